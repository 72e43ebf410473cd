//! Discovery of the collaborator markup on a host page.
//!
//! Each feature looks for its elements by selector and degrades to inert
//! when they are missing. Discovery only reads the document; all later
//! mutations go through [`crate::page::Effect`].

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::config::Selectors;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("Invalid selector for {field}: {selector}")]
    InvalidSelector { field: &'static str, selector: String },
}

/// Nav toggle control as found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMarkup {
    /// Whether `aria-expanded` was exactly `"true"` at load time.
    pub expanded: bool,
}

/// Search controls as found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMarkup {
    /// Initial value of the search input.
    pub value: String,
    pub has_button: bool,
}

/// Carousel elements as found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselMarkup {
    /// Number of direct element children of the track.
    pub slide_count: usize,
    pub dot_count: usize,
}

/// What the host page provides, by feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMarkup {
    /// Present only when both the toggle and the panel exist.
    pub nav: Option<NavMarkup>,
    pub search: Option<SearchMarkup>,
    pub carousel: Option<CarouselMarkup>,
}

impl PageMarkup {
    /// Parse a full HTML document and locate collaborator elements.
    pub fn discover(html: &str, selectors: &Selectors) -> Result<Self, MarkupError> {
        let document = Html::parse_document(html);

        let nav_toggle = parse_selector("nav_toggle", &selectors.nav_toggle)?;
        let nav_panel = parse_selector("nav_panel", &selectors.nav_panel)?;
        let search_input = parse_selector("search_input", &selectors.search_input)?;
        let search_button = parse_selector("search_button", &selectors.search_button)?;
        let carousel_track = parse_selector("carousel_track", &selectors.carousel_track)?;
        let carousel_dot = parse_selector("carousel_dot", &selectors.carousel_dot)?;

        let nav = match (
            document.select(&nav_toggle).next(),
            document.select(&nav_panel).next(),
        ) {
            (Some(toggle), Some(_)) => Some(NavMarkup {
                expanded: toggle.value().attr("aria-expanded") == Some("true"),
            }),
            _ => None,
        };

        let search = document.select(&search_input).next().map(|input| SearchMarkup {
            value: input.value().attr("value").unwrap_or_default().to_string(),
            has_button: document.select(&search_button).next().is_some(),
        });

        let carousel = document
            .select(&carousel_track)
            .next()
            .map(|track| CarouselMarkup {
                slide_count: track.children().filter_map(ElementRef::wrap).count(),
                dot_count: document.select(&carousel_dot).count(),
            });

        tracing::debug!(
            nav = nav.is_some(),
            search = search.is_some(),
            carousel = carousel.is_some(),
            "Discovered page markup"
        );

        Ok(Self {
            nav,
            search,
            carousel,
        })
    }
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|_| MarkupError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}
