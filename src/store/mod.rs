//! # Crawl State Storage Module
//!
//! Crawl frontier results are recorded through the [`CrawlStore`]
//! trait so a crawl can run against transient in-process state or a
//! local database collection that survives the process. The persistent
//! backend is what lets an interrupted crawl be resumed, or a completed
//! one be reused without touching the network.
//!
//! ## Key Components
//!
//! - `CrawlStore`: The storage capability the crawl strategies write to
//! - `PageRecord`: One visited page (`url` is the only field consumers
//!   rely on)
//! - `MemoryStore`: Transient backend
//! - `Database`: libsql-backed persistent backend

mod database;
mod memory;
mod schema;

pub use database::Database;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem failure reading or writing an artifact
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Cache artifact did not match the expected JSON shape
    #[error("cache artifact error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persistent collection failure
    #[error("database error: {0}")]
    Database(String),
}

/// One visited page in a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Full URL that was fetched
    pub url: String,

    /// The URL's path component
    pub path: String,

    /// When the page was visited
    pub visited_at: DateTime<Utc>,
}

impl PageRecord {
    /// Record a page visited now
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            visited_at: Utc::now(),
        }
    }
}

/// Storage capability for crawl state
///
/// Implementations must tolerate concurrent readers but writes arrive
/// serialized: the crawl loop is the only writer.
#[async_trait]
pub trait CrawlStore: Send + Sync {
    /// Whether the store holds no recorded pages
    async fn is_empty(&self) -> Result<bool, StorageError>;

    /// Record a visited page; re-recording the same URL overwrites
    async fn record(&self, page: &PageRecord) -> Result<(), StorageError>;

    /// All recorded pages in recording order
    async fn pages(&self) -> Result<Vec<PageRecord>, StorageError>;

    /// Drop all recorded pages
    async fn clear(&self) -> Result<(), StorageError>;
}
