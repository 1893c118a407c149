//! # Strategy Selection and Entry Point
//!
//! [`determine_paths`] is the one call the surrounding screenshot tool
//! makes: pick a discovery strategy from the configuration, run it,
//! write the resulting path set to the cache file, and hand the store
//! back. When the caller already configured its paths explicitly,
//! discovery is a no-op — no network, no artifact.

use tracing::{debug, info, instrument};

use crate::config::{SpiderConfig, StorageMode};
use crate::crawler;
use crate::error::Result;
use crate::paths::PathStore;
use crate::sitemap;

/// The three interchangeable discovery strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Parse the configured sitemap
    Sitemap,
    /// Breadth-first crawl with transient state
    Crawl,
    /// Breadth-first crawl recorded in the local database
    PersistentCrawl,
}

impl Strategy {
    /// Resolve the strategy for a configuration, first match wins
    ///
    /// `None` means the caller's explicit path list makes discovery
    /// unnecessary.
    pub fn select(config: &SpiderConfig) -> Option<Strategy> {
        if config.paths_override.is_some() {
            return None;
        }
        if config.sitemap.is_some() {
            return Some(Strategy::Sitemap);
        }
        match config.storage_mode {
            StorageMode::Persistent => Some(Strategy::PersistentCrawl),
            StorageMode::Memory => Some(Strategy::Crawl),
        }
    }
}

/// Discover the site's paths and persist them to the cache file
///
/// Returns `None` when `paths_override` is set: the path set is the
/// caller's business and nothing is fetched or written.
#[instrument(skip(config))]
pub async fn determine_paths(config: &SpiderConfig) -> Result<Option<PathStore>> {
    let Some(strategy) = Strategy::select(config) else {
        debug!("paths already defined in config, skipping discovery");
        return Ok(None);
    };

    let store = match strategy {
        Strategy::Sitemap => {
            info!("no paths defined in config, loading paths from sitemap");
            sitemap::discover(config).await?
        }
        Strategy::PersistentCrawl => {
            info!("no paths defined in config, crawling from site root");
            crawler::discover_persistent(config).await?
        }
        Strategy::Crawl => {
            info!("no paths defined in config, crawling from site root");
            crawler::discover(config).await?
        }
    };

    store.save(&config.cache_file).await?;
    Ok(Some(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_everything() {
        let config = SpiderConfig::builder()
            .paths_override(vec!["/a".to_string()])
            .sitemap("http://example.com/sitemap.xml")
            .storage_mode(StorageMode::Persistent)
            .build();
        assert_eq!(Strategy::select(&config), None);
    }

    #[test]
    fn sitemap_wins_over_storage_mode() {
        let config = SpiderConfig::builder()
            .sitemap("http://example.com/sitemap.xml")
            .storage_mode(StorageMode::Persistent)
            .build();
        assert_eq!(Strategy::select(&config), Some(Strategy::Sitemap));
    }

    #[test]
    fn persistent_mode_selects_persistent_crawl() {
        let config = SpiderConfig::builder()
            .storage_mode(StorageMode::Persistent)
            .build();
        assert_eq!(Strategy::select(&config), Some(Strategy::PersistentCrawl));
    }

    #[test]
    fn default_is_the_in_memory_crawl() {
        let config = SpiderConfig::builder().build();
        assert_eq!(Strategy::select(&config), Some(Strategy::Crawl));
    }

    #[tokio::test]
    async fn override_does_no_io() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("paths.json");

        // unroutable base URL: any network attempt would error
        let config = SpiderConfig::builder()
            .base_url("http://127.0.0.1:1")
            .paths_override(vec!["/a".to_string()])
            .cache_file(&cache)
            .build();

        let result = determine_paths(&config).await.unwrap();
        assert!(result.is_none());
        assert!(!cache.exists());
    }

    #[tokio::test]
    async fn sitemap_discovery_writes_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("paths.json");
        let sitemap_file = dir.path().join("sitemap.xml");
        tokio::fs::write(
            &sitemap_file,
            "<urlset><url><loc>http://example.com/foo</loc></url></urlset>",
        )
        .await
        .unwrap();

        let config = SpiderConfig::builder()
            .base_url("http://example.com")
            .sitemap(sitemap_file.to_str().unwrap())
            .domain_aliases(vec!["http://example.com".to_string()])
            .cache_file(&cache)
            .build();

        let store = determine_paths(&config).await.unwrap().unwrap();
        assert_eq!(store.get("foo"), Some("/foo"));

        let reloaded = PathStore::load(&cache).await.unwrap();
        assert_eq!(reloaded, store);
    }

    #[tokio::test]
    async fn crawl_discovery_writes_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("paths.json");
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body><a href=\"/about\">a</a></body></html>")
            .create_async()
            .await;
        server
            .mock("GET", "/about")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create_async()
            .await;

        let config = SpiderConfig::builder()
            .base_url(server.url())
            .cache_file(&cache)
            .database_path(dir.path().join("state.db"))
            .request_timeout_secs(5)
            .build();

        let store = determine_paths(&config).await.unwrap().unwrap();
        assert_eq!(store.len(), 2);

        let reloaded = PathStore::load(&cache).await.unwrap();
        assert_eq!(reloaded, store);
    }
}
