//! Router configuration for the preview server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.site_dir);

    Router::new()
        .route("/api/search", get(handlers::api_search))
        .route("/api/search/panel", get(handlers::api_search_panel))
        // Everything else is the site itself
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
