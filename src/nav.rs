//! Mobile navigation toggle.

use crate::markup::NavMarkup;
use crate::page::Effect;

/// Expanded/collapsed state mirrored between the toggle's `aria-expanded`
/// attribute and the panel's `active` class.
#[derive(Debug, Clone, Default)]
pub struct NavToggle {
    /// `None` when the toggle or the panel is missing.
    expanded: Option<bool>,
}

impl NavToggle {
    pub fn new(markup: Option<&NavMarkup>) -> Self {
        Self {
            expanded: markup.map(|m| m.expanded),
        }
    }

    pub fn is_active(&self) -> bool {
        self.expanded.is_some()
    }

    pub fn expanded(&self) -> Option<bool> {
        self.expanded
    }

    /// Handle a click on the toggle control.
    pub fn click(&mut self) -> Vec<Effect> {
        let Some(expanded) = self.expanded.as_mut() else {
            return Vec::new();
        };
        *expanded = !*expanded;
        vec![
            Effect::SetAriaExpanded(*expanded),
            Effect::SetNavPanelActive(*expanded),
        ]
    }
}
