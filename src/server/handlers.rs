//! HTTP request handlers for the preview server.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::search::{render, search, RenderOutcome};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Matching index entries as JSON.
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let results = search(&params.q, state.index.get(), state.max_results);
    Json(results)
}

/// Rendered results panel, or 404 with the no-results message.
pub async fn api_search_panel(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let results = search(&params.q, state.index.get(), state.max_results);
    match render(&results, &state.messages) {
        RenderOutcome::Notify(message) => (StatusCode::NOT_FOUND, message).into_response(),
        RenderOutcome::Panel(panel) => match panel.to_html() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!("Failed to render results panel: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render results").into_response()
            }
        },
    }
}
