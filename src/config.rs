//! # Discovery Configuration Module
//!
//! This module provides configuration options for path discovery,
//! mirroring the fields the surrounding screenshot tool reads from its
//! own config file. It uses a builder pattern for flexible
//! configuration.
//!
//! ## Key Components
//!
//! - `SpiderConfig`: The main configuration struct consumed by
//!   `discover::determine_paths`
//! - `SpiderConfigBuilder`: Builder pattern implementation for easier
//!   configuration
//! - `StorageMode`: Selects transient or persistent crawl state

use std::path::PathBuf;
use std::time::Duration;

/// Where crawl frontier/visited state lives during a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// In-process memory; progress is lost on interruption
    #[default]
    Memory,
    /// Local database collection; a prior crawl can be reused or resumed
    Persistent,
}

/// Configuration for a discovery run
///
/// Read-only to the discovery strategies; the builder is the only way
/// to assemble one.
#[derive(Debug, Clone)]
pub struct SpiderConfig {
    /// Root URL of the target site, crawl starting point
    pub base_url: String,

    /// Sitemap location (URL or local file); when set, the sitemap
    /// strategy runs instead of a crawl
    pub sitemap: Option<String>,

    /// Paths already known to the caller; when set, discovery is a
    /// no-op
    pub paths_override: Option<Vec<String>>,

    /// Where the discovered path set is written
    pub cache_file: PathBuf,

    /// Cache artifact age (in days) beyond which it is re-discovered
    pub max_age_days: u64,

    /// Regular expressions for paths that must not be visited or kept
    pub skip_patterns: Vec<String>,

    /// Transient or persistent crawl state
    pub storage_mode: StorageMode,

    /// Equivalent domain strings stripped from sitemap locations
    pub domain_aliases: Vec<String>,

    /// Location of the persistent crawl-state database
    pub database_path: PathBuf,

    /// Discard cached and recorded state and discover from scratch
    pub refresh: bool,

    /// Maximum in-flight page fetches during a crawl
    pub concurrency: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            sitemap: None,
            paths_override: None,
            cache_file: PathBuf::from("spider_paths.json"),
            max_age_days: 7,
            skip_patterns: Vec::new(),
            storage_mode: StorageMode::Memory,
            domain_aliases: Vec::new(),
            database_path: PathBuf::from("spider_state.db"),
            refresh: false,
            concurrency: 8,
            request_timeout_secs: 30,
            user_agent: format!("pathscout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for SpiderConfig
#[derive(Debug, Default)]
pub struct SpiderConfigBuilder {
    config: SpiderConfig,
}

impl SpiderConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: SpiderConfig::default(),
        }
    }

    /// Set the root URL of the target site
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the sitemap location (URL or local file)
    pub fn sitemap(mut self, sitemap: impl Into<String>) -> Self {
        self.config.sitemap = Some(sitemap.into());
        self
    }

    /// Provide paths already known to the caller
    pub fn paths_override(mut self, paths: Vec<String>) -> Self {
        self.config.paths_override = Some(paths);
        self
    }

    /// Set where the discovered path set is written
    pub fn cache_file(mut self, cache_file: impl Into<PathBuf>) -> Self {
        self.config.cache_file = cache_file.into();
        self
    }

    /// Set the cache staleness threshold in days
    pub fn max_age_days(mut self, days: u64) -> Self {
        self.config.max_age_days = days;
        self
    }

    /// Set the skip patterns (regular expression strings)
    pub fn skip_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config.skip_patterns = patterns;
        self
    }

    /// Set transient or persistent crawl state
    pub fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.config.storage_mode = mode;
        self
    }

    /// Set the equivalent domain strings stripped from sitemap entries
    pub fn domain_aliases(mut self, aliases: Vec<String>) -> Self {
        self.config.domain_aliases = aliases;
        self
    }

    /// Set the location of the persistent crawl-state database
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = path.into();
        self
    }

    /// Discard cached and recorded state before discovering
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.config.refresh = refresh;
        self
    }

    /// Set the maximum number of in-flight page fetches
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-request timeout in seconds
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Set the user agent sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> SpiderConfig {
        self.config
    }
}

impl SpiderConfig {
    /// Create a new builder
    pub fn builder() -> SpiderConfigBuilder {
        SpiderConfigBuilder::new()
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SpiderConfig::builder()
            .base_url("http://example.com")
            .sitemap("http://example.com/sitemap.xml")
            .max_age_days(3)
            .storage_mode(StorageMode::Persistent)
            .concurrency(4)
            .build();

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.sitemap.as_deref(), Some("http://example.com/sitemap.xml"));
        assert_eq!(config.max_age_days, 3);
        assert_eq!(config.storage_mode, StorageMode::Persistent);
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn concurrency_never_zero() {
        let config = SpiderConfig::builder().concurrency(0).build();
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn default_user_agent_carries_version() {
        let config = SpiderConfig::default();
        assert!(config.user_agent.starts_with("pathscout/"));
    }
}
