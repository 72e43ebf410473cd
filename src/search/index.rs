//! Search index entries and substring matching.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

/// One searchable page summary, as produced by the site's index generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub url: String,
    /// Top-level content section; informational, never searched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl SearchIndexEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            content: None,
            url: url.into(),
            section: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Description for display; empty when absent.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Check whether an already lowercased query occurs in the title,
    /// description or content.
    fn matches_folded(&self, folded_query: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(folded_query);
        contains(&self.title)
            || self.description.as_deref().is_some_and(contains)
            || self.content.as_deref().is_some_and(contains)
    }
}

/// Ordered, immutable sequence of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Arc<[SearchIndexEntry]>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SearchIndex {
    pub fn new(entries: Vec<SearchIndexEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Parse the JSON array served as `search-index.json`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let entries: Vec<SearchIndexEntry> = serde_json::from_slice(bytes)?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[SearchIndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write-once slot for the page's index, shared with the loading task.
#[derive(Debug, Clone, Default)]
pub struct IndexHandle {
    cell: Arc<OnceCell<SearchIndex>>,
}

impl IndexHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` until a load has completed successfully.
    pub fn get(&self) -> Option<&SearchIndex> {
        self.cell.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Store the loaded index. Returns `false` if one was already stored.
    pub fn set(&self, index: SearchIndex) -> bool {
        self.cell.set(index).is_ok()
    }
}

/// Case-insensitive substring search preserving index order.
///
/// Returns nothing when the index is absent or the query is empty. At most
/// `limit` entries are returned.
pub fn search(query: &str, index: Option<&SearchIndex>, limit: usize) -> Vec<SearchIndexEntry> {
    let Some(index) = index else {
        return Vec::new();
    };
    if query.is_empty() {
        return Vec::new();
    }

    let folded = query.to_lowercase();
    index
        .entries()
        .iter()
        .filter(|entry| entry.matches_folded(&folded))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> SearchIndex {
        SearchIndex::new(vec![
            SearchIndexEntry::new("Cats", "/cats").with_description("About cats"),
            SearchIndexEntry::new("Dogs", "/dogs"),
        ])
    }

    #[test]
    fn test_search_matches_title_case_insensitive() {
        let index = pets();
        let results = search("cat", Some(&index), 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Cats");

        let results = search("DOG", Some(&index), 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "/dogs");
    }

    #[test]
    fn test_search_no_match() {
        assert!(search("z", Some(&pets()), 10).is_empty());
    }

    #[test]
    fn test_search_empty_query_or_missing_index() {
        assert!(search("", Some(&pets()), 10).is_empty());
        assert!(search("cat", None, 10).is_empty());
    }

    #[test]
    fn test_search_matches_description_and_content() {
        let index = SearchIndex::new(vec![
            SearchIndexEntry::new("One", "/1").with_description("Feline friends"),
            SearchIndexEntry::new("Two", "/2").with_content("A long body about felines"),
            SearchIndexEntry::new("Three", "/3"),
        ]);
        let urls: Vec<_> = search("feline", Some(&index), 10)
            .into_iter()
            .map(|e| e.url)
            .collect();
        assert_eq!(urls, vec!["/1", "/2"]);
    }

    #[test]
    fn test_section_is_not_searched() {
        let mut entry = SearchIndexEntry::new("Manual", "/m");
        entry.section = Some("products".to_string());
        let index = SearchIndex::new(vec![entry]);
        assert!(search("products", Some(&index), 10).is_empty());
    }

    #[test]
    fn test_search_truncates_and_keeps_order() {
        let entries = (0..25)
            .map(|i| SearchIndexEntry::new(format!("Page {}", i), format!("/p/{}", i)))
            .collect();
        let index = SearchIndex::new(entries);

        let results = search("page", Some(&index), 10);
        assert_eq!(results.len(), 10);
        for (i, entry) in results.iter().enumerate() {
            assert_eq!(entry.url, format!("/p/{}", i));
        }
    }

    #[test]
    fn test_results_are_stable_subsequence() {
        let index = SearchIndex::new(vec![
            SearchIndexEntry::new("alpha", "/a"),
            SearchIndexEntry::new("beta", "/b"),
            SearchIndexEntry::new("alphabet", "/ab"),
            SearchIndexEntry::new("gamma", "/g"),
            SearchIndexEntry::new("Alpha Centauri", "/ac"),
        ]);
        for query in ["a", "alpha", "ph", "bet", "GAMMA"] {
            let results = search(query, Some(&index), 10);
            let mut cursor = 0;
            for result in &results {
                assert!(result.title.to_lowercase().contains(&query.to_lowercase()));
                let pos = index.entries()[cursor..]
                    .iter()
                    .position(|e| e == result)
                    .expect("result must appear later in index");
                cursor += pos + 1;
            }
        }
    }

    #[test]
    fn test_from_json_optional_fields() {
        let json = br#"[
            {"title": "Cats", "description": "About cats", "url": "/cats", "section": "pets"},
            {"title": "Dogs", "url": "/dogs", "content": "Woof", "extra": 1}
        ]"#;
        let index = SearchIndex::from_json(json).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.entries()[0].section.as_deref(), Some("pets"));
        assert_eq!(index.entries()[1].description, None);
        assert_eq!(index.entries()[1].content.as_deref(), Some("Woof"));
    }

    #[test]
    fn test_from_json_rejects_missing_url() {
        assert!(SearchIndex::from_json(br#"[{"title": "x"}]"#).is_err());
        assert!(SearchIndex::from_json(b"{}").is_err());
    }

    #[test]
    fn test_handle_is_write_once() {
        let handle = IndexHandle::new();
        assert!(handle.get().is_none());
        assert!(handle.set(pets()));
        assert!(!handle.set(SearchIndex::default()));
        assert_eq!(handle.get().map(SearchIndex::len), Some(2));

        let shared = handle.clone();
        assert!(shared.is_loaded());
    }
}
