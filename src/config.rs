//! Configuration management for sitekit using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Default location of the search index relative to the site root.
pub const DEFAULT_INDEX_PATH: &str = "/search-index.json";

/// Default maximum number of results shown in the results panel.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default user agent for index requests.
pub const USER_AGENT: &str = concat!("sitekit/", env!("CARGO_PKG_VERSION"));

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// CSS selectors describing the collaborator markup on the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub nav_toggle: String,
    pub nav_panel: String,
    pub search_input: String,
    pub search_button: String,
    pub carousel_track: String,
    pub carousel_dot: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            nav_toggle: ".nav-toggle".to_string(),
            nav_panel: ".main-nav".to_string(),
            search_input: "#site-search".to_string(),
            search_button: "#search-btn".to_string(),
            carousel_track: "#carouselTrack".to_string(),
            carousel_dot: ".carousel-dot".to_string(),
        }
    }
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Shown as a blocking notification when a query matches nothing.
    pub no_results: String,
    /// Appended to the match count in the results heading.
    pub result_count_suffix: String,
    /// Label of the close control on the results panel.
    pub close_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_results: "No results found".to_string(),
            result_count_suffix: "result(s)".to_string(),
            close_label: "×".to_string(),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the search index lives. Absolute URL, site-relative path, or a
    /// local file path.
    pub index_url: String,
    /// Base URL that site-relative index paths are resolved against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// User agent string for index requests.
    pub user_agent: String,
    /// Maximum number of search results rendered.
    pub max_results: usize,
    pub selectors: Selectors,
    pub messages: Messages,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_PATH.to_string(),
            base_url: None,
            request_timeout: 30,
            user_agent: USER_AGENT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            selectors: Selectors::default(),
            messages: Messages::default(),
            source_path: None,
        }
    }
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults (with env overrides) if nothing is found or the
    /// discovered file fails to parse.
    pub async fn load() -> Self {
        match prefer::load("sitekit").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config {}: {}", path.display(), e);
                            Self::default_with_env()
                        }
                    }
                } else {
                    Self::default_with_env()
                }
            }
            Err(_) => Self::default_with_env(),
        }
    }

    /// Create a default config with environment variable overrides applied.
    pub fn default_with_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a specific file path.
    /// Supports TOML, YAML and JSON based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config.with_env_overrides())
    }

    /// Parse configuration text in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, ConfigError> {
        let config = match ext {
            "toml" => toml::from_str(contents)?,
            "yaml" | "yml" => serde_yaml::from_str(contents)?,
            _ => serde_json::from_str(contents)?,
        };
        Ok(config)
    }

    /// Apply `SITEKIT_INDEX_URL` and `SITEKIT_BASE_URL` overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("SITEKIT_INDEX_URL") {
            if !url.is_empty() {
                self.index_url = url;
            }
        }
        if let Ok(base) = std::env::var("SITEKIT_BASE_URL") {
            if !base.is_empty() {
                self.base_url = Some(base);
            }
        }
        self
    }

    /// Resolve where the index should be loaded from.
    ///
    /// Absolute URLs are used as-is. Site-relative paths are joined onto
    /// `base_url` when one is configured, otherwise treated as file paths
    /// (relative paths resolve against the config file's directory).
    pub fn index_location(&self) -> IndexLocation {
        if let Ok(url) = Url::parse(&self.index_url) {
            if matches!(url.scheme(), "http" | "https") {
                return IndexLocation::Remote(url);
            }
            if url.scheme() == "file" {
                if let Ok(path) = url.to_file_path() {
                    return IndexLocation::File(path);
                }
            }
        }

        if let Some(base) = self.base_url.as_deref().and_then(|b| Url::parse(b).ok()) {
            if let Ok(url) = base.join(&self.index_url) {
                return IndexLocation::Remote(url);
            }
        }

        let path = PathBuf::from(&self.index_url);
        match self.base_dir() {
            Some(dir) if path.is_relative() => IndexLocation::File(dir.join(path)),
            _ => IndexLocation::File(path),
        }
    }

    /// Resolve the index for a page served from `site_root`.
    ///
    /// Without a `base_url`, a site-relative path such as the default
    /// `/search-index.json` only names a real file when the site happens to
    /// live at the filesystem root. When that file does not exist the path is
    /// looked up under `site_root` instead.
    pub fn index_location_in_site(&self, site_root: &Path) -> IndexLocation {
        let location = self.index_location();
        if let IndexLocation::File(path) = &location {
            let site_path = self
                .index_url
                .strip_prefix('/')
                .filter(|rest| !rest.starts_with('/'));
            if let (false, Some(rest)) = (path.exists(), site_path) {
                return IndexLocation::File(site_root.join(rest));
            }
        }
        location
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }
}

/// Resolved index source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLocation {
    Remote(Url),
    File(PathBuf),
}

impl std::fmt::Display for IndexLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexLocation::Remote(url) => write!(f, "{}", url),
            IndexLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}
