//! Preview server for a built site.
//!
//! Serves the site directory as static files and exposes the search core
//! over HTTP, so the index and the results panel can be checked against the
//! real site before deploying.

mod handlers;
mod routes;

pub use routes::create_router;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, IndexLocation, Messages};
use crate::search::{IndexHandle, IndexLoader};

/// Index file expected at the root of the site directory.
pub const INDEX_FILENAME: &str = "search-index.json";

/// Shared state for the preview server.
#[derive(Clone)]
pub struct AppState {
    pub site_dir: PathBuf,
    pub index: IndexHandle,
    pub max_results: usize,
    pub messages: Messages,
}

impl AppState {
    /// Load `<site_dir>/search-index.json`. A missing or broken index is
    /// logged and leaves search returning nothing.
    pub async fn new(site_dir: PathBuf, config: &Config) -> anyhow::Result<Self> {
        let index = IndexHandle::new();
        let loader = IndexLoader::new(
            IndexLocation::File(site_dir.join(INDEX_FILENAME)),
            Duration::from_secs(config.request_timeout),
            &config.user_agent,
        )?;
        loader.load_into(&index).await;

        Ok(Self {
            site_dir,
            index,
            max_results: config.max_results,
            messages: config.messages.clone(),
        })
    }
}

/// Start the preview server.
pub async fn serve(site_dir: PathBuf, config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(site_dir, config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Starting preview server at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    async fn setup_test_app() -> (axum::Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(INDEX_FILENAME),
            r#"[
                {"title": "Cats", "description": "About cats", "url": "/cats"},
                {"title": "Dogs", "url": "/dogs"}
            ]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("index.html"), "<html><body>home</body></html>").unwrap();

        let state = AppState::new(dir.path().to_path_buf(), &Config::default())
            .await
            .unwrap();
        (create_router(state), dir)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_api_search() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/search?q=cat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["title"], "Cats");
        assert_eq!(json[0]["url"], "/cats");
    }

    #[tokio::test]
    async fn test_api_search_empty_query() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_panel_fragment() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/search/panel?q=dog")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<h2>1 result(s)</h2>"));
        assert!(html.contains("<strong>Dogs</strong>"));
    }

    #[tokio::test]
    async fn test_panel_no_results() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/search/panel?q=zebra")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "No results found");
    }

    #[tokio::test]
    async fn test_static_files() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/index.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("home"));
    }

    #[tokio::test]
    async fn test_serve_binds_hostname() {
        let dir = tempdir().unwrap();
        let server = tokio::spawn(async move {
            serve(dir.path().to_path_buf(), &Config::default(), "localhost", 0).await
        });
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        // A bind failure would have ended the task with an error by now.
        assert!(!server.is_finished());
        server.abort();
    }

    #[tokio::test]
    async fn test_missing_index_degrades() {
        let dir = tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), &Config::default())
            .await
            .unwrap();
        assert!(!state.index.is_loaded());

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/search?q=cat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json.as_array().unwrap().is_empty());
    }
}
