//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and scraping behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Key-value store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Manual refresh settings
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// - `KV_REST_API_URL` + `KV_REST_API_TOKEN`: switch to the REST store
    /// - `SCRAPER_SECRET_KEY`: bearer secret for manual refreshes
    /// - `SCRAPER_TIMEOUT_SECS`: HTTP request timeout
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("KV_REST_API_URL") {
            self.store.backend = StoreBackend::Rest;
            self.store.rest_url = url;
        }
        if let Some(token) = non_empty("KV_REST_API_TOKEN") {
            self.store.rest_token = token;
        }
        if let Some(secret) = non_empty("SCRAPER_SECRET_KEY") {
            self.refresh.secret_key = secret;
        }
        if let Some(secs) = non_empty("SCRAPER_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.crawler.timeout_secs = secs;
        }

        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        match self.store.backend {
            StoreBackend::Local if self.store.path.as_os_str().is_empty() => {
                return Err(AppError::validation("store.path is empty"));
            }
            StoreBackend::Rest if self.store.rest_url.trim().is_empty() => {
                return Err(AppError::validation("store.rest_url is empty"));
            }
            StoreBackend::Rest if self.store.rest_token.trim().is_empty() => {
                return Err(AppError::validation("store.rest_token is empty"));
            }
            _ => {}
        }
        Ok(())
    }

    /// Configured refresh secret, if any.
    pub fn refresh_secret(&self) -> Option<&str> {
        let secret = self.refresh.secret_key.trim();
        (!secret.is_empty()).then_some(secret)
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Which key-value backend holds the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    Local,
    Rest,
}

/// Key-value store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// File holding the keyspace for the local backend
    #[serde(default = "defaults::store_path")]
    pub path: PathBuf,

    /// Base URL of the REST endpoint
    #[serde(default)]
    pub rest_url: String,

    /// Bearer token for the REST endpoint
    #[serde(default)]
    pub rest_token: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: defaults::store_path(),
            rest_url: String::new(),
            rest_token: String::new(),
        }
    }
}

/// Manual refresh settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Bearer secret; refreshes are refused while empty
    #[serde(default)]
    pub secret_key: String,
}

mod defaults {
    use std::path::PathBuf;

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; SydneyEvents/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn store_path() -> PathBuf {
        PathBuf::from("storage/store.json")
    }
}
