//! Results panel rendering.
//!
//! Rendering produces data first ([`RenderOutcome`]); HTML is generated only
//! by [`ResultsPanel::to_html`], through an auto-escaping template. Index
//! content therefore always lands in the page as text, and link targets are
//! limited to relative paths and `http`/`https` URLs.

use askama::Template;
use url::Url;

use super::index::SearchIndexEntry;
use crate::config::Messages;
use crate::page::Effect;

/// CSS class of the results panel root element.
pub const RESULTS_PANEL_CLASS: &str = "search-results";

/// Link target used in place of an index URL with a disallowed scheme.
pub const BLOCKED_HREF: &str = "#";

/// Keep relative references and web URLs; anything else (`javascript:`,
/// `data:`, unparsable absolute URLs) becomes [`BLOCKED_HREF`].
fn safe_href(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => url.to_string(),
        Ok(parsed) => {
            tracing::debug!("Blocked result link with scheme {:?}", parsed.scheme());
            BLOCKED_HREF.to_string()
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => url.to_string(),
        Err(_) => BLOCKED_HREF.to_string(),
    }
}

/// One link in the results list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub url: String,
    pub title: String,
    pub description: String,
}

impl From<&SearchIndexEntry> for ResultItem {
    fn from(entry: &SearchIndexEntry) -> Self {
        Self {
            url: safe_href(&entry.url),
            title: entry.title.clone(),
            description: entry.description_text().to_string(),
        }
    }
}

/// Overlay listing matched entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPanel {
    pub heading: String,
    pub close_label: String,
    pub items: Vec<ResultItem>,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div class="search-results">
  <div class="search-results-overlay" data-dismiss="search-results"></div>
  <div class="search-results-content">
    <button class="search-close" data-dismiss="search-results">{{ close_label }}</button>
    <h2>{{ heading }}</h2>
    <ul>
    {%- for item in items %}
      <li>
        <a href="{{ item.url }}">
          <strong>{{ item.title }}</strong>
          <p>{{ item.description }}</p>
        </a>
      </li>
    {%- endfor %}
    </ul>
  </div>
</div>"#
)]
struct ResultsPanelTemplate<'a> {
    heading: &'a str,
    close_label: &'a str,
    items: &'a [ResultItem],
}

impl ResultsPanel {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render the panel markup appended to the page body.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        ResultsPanelTemplate {
            heading: &self.heading,
            close_label: &self.close_label,
            items: &self.items,
        }
        .render()
    }
}

/// What showing a result set amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing matched: tell the user, show no panel.
    Notify(String),
    Panel(ResultsPanel),
}

impl RenderOutcome {
    /// Any previous panel is removed before the new outcome is shown.
    pub fn into_effects(self) -> Vec<Effect> {
        let shown = match self {
            RenderOutcome::Notify(message) => Effect::Notify(message),
            RenderOutcome::Panel(panel) => Effect::ShowResultsPanel(panel),
        };
        vec![Effect::RemoveResultsPanel, shown]
    }
}

/// Build the outcome for a result set.
pub fn render(results: &[SearchIndexEntry], messages: &Messages) -> RenderOutcome {
    if results.is_empty() {
        return RenderOutcome::Notify(messages.no_results.clone());
    }
    RenderOutcome::Panel(ResultsPanel {
        heading: format!("{} {}", results.len(), messages.result_count_suffix),
        close_label: messages.close_label.clone(),
        items: results.iter().map(ResultItem::from).collect(),
    })
}
