//! Client-side site search.
//!
//! The index is loaded once per page into an [`IndexHandle`]; queries are
//! plain case-insensitive substring matches over title, description and
//! content, kept in index order.

mod index;
mod loader;
mod panel;

pub use index::{search, IndexHandle, SearchIndex, SearchIndexEntry};
pub use loader::{IndexError, IndexLoader};
pub use panel::{render, RenderOutcome, ResultItem, ResultsPanel, RESULTS_PANEL_CLASS};

use crate::config::Messages;
use crate::markup::SearchMarkup;
use crate::page::Effect;

/// Default cap on rendered results.
pub const MAX_RESULTS: usize = crate::config::DEFAULT_MAX_RESULTS;

/// Search controls bound to a page.
#[derive(Debug, Clone)]
pub struct SiteSearch {
    index: IndexHandle,
    has_input: bool,
    has_button: bool,
    max_results: usize,
    messages: Messages,
}

impl SiteSearch {
    pub fn new(
        markup: Option<&SearchMarkup>,
        index: IndexHandle,
        max_results: usize,
        messages: Messages,
    ) -> Self {
        Self {
            index,
            has_input: markup.is_some(),
            has_button: markup.is_some_and(|m| m.has_button),
            max_results,
            messages,
        }
    }

    /// Search needs an input element; without one nothing is wired.
    pub fn is_active(&self) -> bool {
        self.has_input
    }

    pub fn has_button(&self) -> bool {
        self.has_button
    }

    pub fn index(&self) -> &IndexHandle {
        &self.index
    }

    /// Run `query` against the loaded index.
    pub fn query(&self, query: &str) -> Vec<SearchIndexEntry> {
        search(query, self.index.get(), self.max_results)
    }

    /// Key press in the search input. Only `Enter` runs a search.
    pub fn key_press(&self, key: &str, value: &str) -> Vec<Effect> {
        if !self.has_input || key != "Enter" {
            return Vec::new();
        }
        self.perform(value)
    }

    /// Activation of the search button.
    pub fn button_click(&self, value: &str) -> Vec<Effect> {
        if !self.has_input || !self.has_button {
            return Vec::new();
        }
        self.perform(value)
    }

    pub fn dismiss(&self) -> Vec<Effect> {
        vec![Effect::RemoveResultsPanel]
    }

    /// An unloaded index or an empty query renders nothing at all.
    fn perform(&self, value: &str) -> Vec<Effect> {
        if !self.index.is_loaded() || value.is_empty() {
            tracing::debug!(
                loaded = self.index.is_loaded(),
                "Search skipped for query {:?}",
                value
            );
            return Vec::new();
        }
        let results = self.query(value);
        tracing::debug!("Query {:?} matched {} entries", value, results.len());
        render(&results, &self.messages).into_effects()
    }
}
