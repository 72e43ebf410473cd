//! Page controller.
//!
//! Owns the per-page component instances and turns page events into
//! [`Effect`]s. Handlers never touch the display directly; a [`Surface`]
//! applies the effects they return.

mod surface;

pub use surface::{apply_all, HeadlessSurface, Surface, SurfaceError};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::carousel::{Carousel, Direction};
use crate::config::Config;
use crate::markup::PageMarkup;
use crate::nav::NavToggle;
use crate::search::{IndexHandle, IndexLoader, ResultsPanel, SiteSearch};

/// A single mutation of the displayed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write `aria-expanded` on the nav toggle.
    SetAriaExpanded(bool),
    /// Add (`true`) or remove the `active` class on the nav panel.
    SetNavPanelActive(bool),
    /// Set the slide track's CSS transform.
    SetTrackTransform(String),
    /// Set the `active` class on the dot at `index`.
    SetDotActive { index: usize, active: bool },
    /// Remove the results panel if one is shown.
    RemoveResultsPanel,
    /// Append a results panel to the page body.
    ShowResultsPanel(ResultsPanel),
    /// Blocking user notification.
    Notify(String),
}

/// Input from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    NavToggleClick,
    /// The search input's value changed.
    SearchInput(String),
    /// Key pressed while the search input has focus.
    SearchKeyPress(String),
    SearchButtonClick,
    /// Overlay or close control of the results panel clicked.
    DismissResults,
    CarouselMove(Direction),
    CarouselGoTo(usize),
}

/// Per-page state and event dispatch.
///
/// Components are wired by the two ready signals; events arriving before
/// their component is wired are ignored.
pub struct PageController {
    markup: PageMarkup,
    config: Config,
    index: IndexHandle,
    input_value: String,
    nav: Option<NavToggle>,
    search: Option<SiteSearch>,
    carousel: Option<Carousel>,
}

impl PageController {
    pub fn new(markup: PageMarkup, config: Config) -> Self {
        let input_value = markup
            .search
            .as_ref()
            .map(|s| s.value.clone())
            .unwrap_or_default();
        Self {
            markup,
            config,
            index: IndexHandle::new(),
            input_value,
            nav: None,
            search: None,
            carousel: None,
        }
    }

    pub fn markup(&self) -> &PageMarkup {
        &self.markup
    }

    /// Handle to the page's search index.
    pub fn index(&self) -> &IndexHandle {
        &self.index
    }

    pub fn nav(&self) -> Option<&NavToggle> {
        self.nav.as_ref()
    }

    pub fn search(&self) -> Option<&SiteSearch> {
        self.search.as_ref()
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    /// First ready signal: wire the nav toggle and search, and start the
    /// index fetch when the page has a search input.
    ///
    /// Must be called from within a tokio runtime when a loader is given.
    pub fn ready(&mut self, loader: Option<&IndexLoader>) -> Option<JoinHandle<()>> {
        self.nav = Some(NavToggle::new(self.markup.nav.as_ref()));

        let search = SiteSearch::new(
            self.markup.search.as_ref(),
            self.index.clone(),
            self.config.max_results,
            self.config.messages.clone(),
        );
        let load = match loader {
            Some(loader) if search.is_active() => Some(loader.spawn_load(self.index.clone())),
            _ => None,
        };
        self.search = Some(search);

        debug!(
            nav = self.markup.nav.is_some(),
            search = self.markup.search.is_some(),
            "Page ready"
        );
        load
    }

    /// Second ready signal: wire the carousel.
    pub fn carousel_ready(&mut self) {
        let carousel = Carousel::new(self.markup.carousel.as_ref());
        debug!(
            active = carousel.is_active(),
            slides = carousel.slide_count(),
            "Carousel ready"
        );
        self.carousel = Some(carousel);
    }

    pub fn handle(&mut self, event: PageEvent) -> Vec<Effect> {
        match event {
            PageEvent::NavToggleClick => self
                .nav
                .as_mut()
                .map(NavToggle::click)
                .unwrap_or_default(),
            PageEvent::SearchInput(value) => {
                if self.markup.search.is_some() {
                    self.input_value = value;
                }
                Vec::new()
            }
            PageEvent::SearchKeyPress(key) => self
                .search
                .as_ref()
                .map(|s| s.key_press(&key, &self.input_value))
                .unwrap_or_default(),
            PageEvent::SearchButtonClick => self
                .search
                .as_ref()
                .map(|s| s.button_click(&self.input_value))
                .unwrap_or_default(),
            PageEvent::DismissResults => self
                .search
                .as_ref()
                .map(SiteSearch::dismiss)
                .unwrap_or_default(),
            PageEvent::CarouselMove(direction) => self
                .carousel
                .as_mut()
                .map(|c| c.move_by(direction))
                .unwrap_or_default(),
            PageEvent::CarouselGoTo(index) => match self.carousel.as_mut() {
                Some(carousel) => carousel.go_to(index).unwrap_or_else(|e| {
                    warn!("Ignoring carousel jump: {}", e);
                    Vec::new()
                }),
                None => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{CarouselMarkup, NavMarkup, SearchMarkup};
    use crate::search::{SearchIndex, SearchIndexEntry};

    fn full_markup() -> PageMarkup {
        PageMarkup {
            nav: Some(NavMarkup { expanded: false }),
            search: Some(SearchMarkup {
                value: String::new(),
                has_button: true,
            }),
            carousel: Some(CarouselMarkup {
                slide_count: 3,
                dot_count: 3,
            }),
        }
    }

    fn ready_controller(markup: PageMarkup) -> PageController {
        let mut page = PageController::new(markup, Config::default());
        page.ready(None);
        page.carousel_ready();
        page.index().set(SearchIndex::new(vec![
            SearchIndexEntry::new("Cats", "/cats").with_description("About cats"),
            SearchIndexEntry::new("Dogs", "/dogs"),
        ]));
        page
    }

    #[test]
    fn test_events_before_ready_are_ignored() {
        let mut page = PageController::new(full_markup(), Config::default());
        assert!(page.handle(PageEvent::NavToggleClick).is_empty());
        assert!(page
            .handle(PageEvent::CarouselMove(Direction::Next))
            .is_empty());
        assert!(page.handle(PageEvent::SearchButtonClick).is_empty());
    }

    #[test]
    fn test_search_uses_current_input_value() {
        let mut page = ready_controller(full_markup());
        page.handle(PageEvent::SearchInput("cat".to_string()));
        let effects = page.handle(PageEvent::SearchKeyPress("Enter".to_string()));
        assert!(matches!(&effects[1], Effect::ShowResultsPanel(p) if p.len() == 1));

        page.handle(PageEvent::SearchInput("z".to_string()));
        let effects = page.handle(PageEvent::SearchButtonClick);
        assert_eq!(effects[1], Effect::Notify("No results found".to_string()));
    }

    #[test]
    fn test_initial_input_value_from_markup() {
        let mut markup = full_markup();
        markup.search = Some(SearchMarkup {
            value: "dog".to_string(),
            has_button: true,
        });
        let mut page = ready_controller(markup);
        let effects = page.handle(PageEvent::SearchButtonClick);
        assert!(matches!(&effects[1], Effect::ShowResultsPanel(p) if p.items[0].title == "Dogs"));
    }

    #[test]
    fn test_goto_out_of_range_is_ignored() {
        let mut page = ready_controller(full_markup());
        page.handle(PageEvent::CarouselMove(Direction::Next));
        assert!(page.handle(PageEvent::CarouselGoTo(7)).is_empty());
        assert_eq!(page.carousel().map(Carousel::current_slide), Some(1));
    }

    #[test]
    fn test_missing_markup_everything_noop() {
        let mut page = ready_controller(PageMarkup::default());
        for event in [
            PageEvent::NavToggleClick,
            PageEvent::SearchInput("cat".to_string()),
            PageEvent::SearchKeyPress("Enter".to_string()),
            PageEvent::SearchButtonClick,
            PageEvent::CarouselMove(Direction::Prev),
            PageEvent::CarouselGoTo(0),
        ] {
            assert!(page.handle(event).is_empty());
        }
        assert_eq!(page.nav().and_then(NavToggle::expanded), None);
    }

    #[tokio::test]
    async fn test_ready_skips_load_without_search_input() {
        let loader = IndexLoader::new(
            crate::config::IndexLocation::File("/nonexistent.json".into()),
            std::time::Duration::from_secs(1),
            "test",
        )
        .unwrap();
        let mut page = PageController::new(PageMarkup::default(), Config::default());
        assert!(page.ready(Some(&loader)).is_none());
    }
}
