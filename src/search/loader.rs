//! Fetching the search index.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::index::{IndexHandle, SearchIndex};
use crate::config::{Config, IndexLocation};

/// Errors that can occur while loading the index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Index request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid index JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads the index from a URL or a local file.
#[derive(Clone)]
pub struct IndexLoader {
    client: Client,
    location: IndexLocation,
}

impl IndexLoader {
    pub fn new(
        location: IndexLocation,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, IndexError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self { client, location })
    }

    pub fn from_config(config: &Config) -> Result<Self, IndexError> {
        Self::with_location(config.index_location(), config)
    }

    /// Use `config`'s client settings with an already resolved location.
    pub fn with_location(location: IndexLocation, config: &Config) -> Result<Self, IndexError> {
        Self::new(
            location,
            Duration::from_secs(config.request_timeout),
            &config.user_agent,
        )
    }

    pub fn location(&self) -> &IndexLocation {
        &self.location
    }

    /// Fetch and parse the index.
    pub async fn load(&self) -> Result<SearchIndex, IndexError> {
        let bytes = match &self.location {
            IndexLocation::Remote(url) => {
                debug!("Fetching search index from {}", url);
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(IndexError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                response.bytes().await?.to_vec()
            }
            IndexLocation::File(path) => {
                debug!("Reading search index from {}", path.display());
                tokio::fs::read(path).await?
            }
        };
        Ok(SearchIndex::from_json(&bytes)?)
    }

    /// Load into `handle` unless it is already populated.
    ///
    /// Failures are logged and leave the handle empty.
    pub async fn load_into(&self, handle: &IndexHandle) {
        if handle.is_loaded() {
            debug!("Search index already loaded, skipping fetch");
            return;
        }
        match self.load().await {
            Ok(index) => {
                let count = index.len();
                if handle.set(index) {
                    info!("Loaded search index from {} ({} entries)", self.location, count);
                }
            }
            Err(e) => warn!("Search index unavailable from {}: {}", self.location, e),
        }
    }

    /// Start loading in the background. The fetch is never cancelled.
    pub fn spawn_load(&self, handle: IndexHandle) -> JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move { loader.load_into(&handle).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn file_loader(path: PathBuf) -> IndexLoader {
        IndexLoader::new(IndexLocation::File(path), Duration::from_secs(5), "test").unwrap()
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search-index.json");
        std::fs::write(
            &path,
            r#"[{"title":"Cats","description":"About cats","url":"/cats"}]"#,
        )
        .unwrap();

        let index = file_loader(path).load().await.unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].url, "/cats");
    }

    #[tokio::test]
    async fn test_parse_error_leaves_handle_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search-index.json");
        std::fs::write(&path, "<html>not json</html>").unwrap();

        let loader = file_loader(path);
        assert!(matches!(loader.load().await, Err(IndexError::Parse(_))));

        let handle = IndexHandle::new();
        loader.load_into(&handle).await;
        assert!(!handle.is_loaded());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let loader = file_loader(PathBuf::from("/nonexistent/search-index.json"));
        assert!(matches!(loader.load().await, Err(IndexError::Io(_))));
    }

    #[tokio::test]
    async fn test_spawn_load_populates_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search-index.json");
        std::fs::write(&path, r#"[{"title":"A","url":"/a"}]"#).unwrap();

        let handle = IndexHandle::new();
        let loader = file_loader(path.clone());
        loader.spawn_load(handle.clone()).await.unwrap();
        assert_eq!(handle.get().map(SearchIndex::len), Some(1));

        // Later loads never replace the first index.
        std::fs::write(&path, r#"[{"title":"A","url":"/a"},{"title":"B","url":"/b"}]"#).unwrap();
        loader.spawn_load(handle.clone()).await.unwrap();
        assert_eq!(handle.get().map(SearchIndex::len), Some(1));
    }
}
