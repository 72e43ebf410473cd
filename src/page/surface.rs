//! Adapters applying effects to a display.

use thiserror::Error;

use super::Effect;
use crate::markup::PageMarkup;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Failed to render results panel: {0}")]
    Render(#[from] askama::Error),
}

/// Something that can display a page.
pub trait Surface {
    fn apply(&mut self, effect: &Effect) -> Result<(), SurfaceError>;
}

/// Apply effects in order, stopping at the first failure.
pub fn apply_all<S: Surface + ?Sized>(
    surface: &mut S,
    effects: &[Effect],
) -> Result<(), SurfaceError> {
    for effect in effects {
        surface.apply(effect)?;
    }
    Ok(())
}

/// In-memory model of the enhanced parts of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessSurface {
    /// `None` when the page has no nav toggle.
    pub aria_expanded: Option<bool>,
    pub nav_panel_active: bool,
    pub track_transform: Option<String>,
    /// Active flag per dot indicator.
    pub dots: Vec<bool>,
    /// Rendered results panels currently attached to the body.
    pub panels: Vec<String>,
    /// Notifications shown to the user, oldest first.
    pub notifications: Vec<String>,
}

impl HeadlessSurface {
    pub fn from_markup(markup: &PageMarkup) -> Self {
        let dot_count = markup.carousel.as_ref().map_or(0, |c| c.dot_count);
        Self {
            aria_expanded: markup.nav.as_ref().map(|n| n.expanded),
            nav_panel_active: false,
            track_transform: None,
            dots: vec![false; dot_count],
            panels: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn panel(&self) -> Option<&str> {
        self.panels.last().map(String::as_str)
    }

    pub fn active_dot(&self) -> Option<usize> {
        self.dots.iter().position(|active| *active)
    }
}

impl Surface for HeadlessSurface {
    fn apply(&mut self, effect: &Effect) -> Result<(), SurfaceError> {
        match effect {
            Effect::SetAriaExpanded(expanded) => {
                if self.aria_expanded.is_some() {
                    self.aria_expanded = Some(*expanded);
                }
            }
            Effect::SetNavPanelActive(active) => self.nav_panel_active = *active,
            Effect::SetTrackTransform(transform) => {
                self.track_transform = Some(transform.clone());
            }
            Effect::SetDotActive { index, active } => {
                if let Some(dot) = self.dots.get_mut(*index) {
                    *dot = *active;
                }
            }
            Effect::RemoveResultsPanel => self.panels.clear(),
            Effect::ShowResultsPanel(panel) => self.panels.push(panel.to_html()?),
            Effect::Notify(message) => self.notifications.push(message.clone()),
        }
        Ok(())
    }
}
