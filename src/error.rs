//! Error types for the pathscout crate

use thiserror::Error;

use crate::store::StorageError;

/// Result type for pathscout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for path discovery operations
///
/// Per-page fetch failures during a crawl are recovered internally
/// (logged and skipped); everything surfaced here aborts the discovery
/// run, since downstream screenshot work needs a complete path set.
#[derive(Debug, Error)]
pub enum Error {
    /// Discovery configuration is unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// A user skip pattern failed to compile
    #[error("invalid skip pattern `{pattern}`: {source}")]
    Pattern {
        /// The pattern as configured
        pattern: String,
        /// Compile failure from the regex engine
        source: regex::Error,
    },

    /// A structurally required fetch failed (sitemap retrieval)
    #[error("fetch error for {url}: {source}")]
    Fetch {
        /// URL that could not be retrieved
        url: String,
        /// Underlying client error
        source: reqwest::Error,
    },

    /// A fetched resource came back with a non-success status
    #[error("unexpected status {status} for {url}")]
    Status {
        /// URL that was requested
        url: String,
        /// HTTP status code returned
        status: u16,
    },

    /// Sitemap XML could not be parsed
    #[error("sitemap parse error: {0}")]
    Parse(String),

    /// Cache artifact or crawl-state store failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The base domain yielded no pages at all
    #[error("crawl failed: {0}")]
    CrawlFailed(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}
