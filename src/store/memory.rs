//! Transient in-process crawl state

use async_trait::async_trait;
use std::sync::Mutex;

use super::{CrawlStore, PageRecord, StorageError};

/// In-memory crawl state; everything is lost when the process exits
///
/// Interruption is acceptable for this backend: the next run simply
/// re-crawls, subject to the cache-file freshness check.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: Mutex<Vec<PageRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CrawlStore for MemoryStore {
    async fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.pages.lock().expect("page list poisoned").is_empty())
    }

    async fn record(&self, page: &PageRecord) -> Result<(), StorageError> {
        let mut pages = self.pages.lock().expect("page list poisoned");
        if let Some(existing) = pages.iter_mut().find(|p| p.url == page.url) {
            *existing = page.clone();
        } else {
            pages.push(page.clone());
        }
        Ok(())
    }

    async fn pages(&self) -> Result<Vec<PageRecord>, StorageError> {
        Ok(self.pages.lock().expect("page list poisoned").clone())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.pages.lock().expect("page list poisoned").clear();
        Ok(())
    }
}
