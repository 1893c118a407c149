//! # Crawl Discovery Strategies
//!
//! Breadth-first traversal of the target site, used when no sitemap is
//! configured. Link filtering happens at enqueue time: asset
//! extensions, user skip patterns, foreign hosts, and already-seen
//! URLs are never requested. Fetches within a frontier batch run with
//! bounded parallelism; all bookkeeping (visited set, frontier, path
//! store, crawl-state records) is mutated only by the crawl task
//! between batches, which is what makes at-most-once enqueue hold.
//!
//! Two variants share the traversal:
//!
//! - [`discover`] keeps crawl state in memory and honors the cache
//!   artifact's freshness fast path.
//! - [`discover_persistent`] records every visited page in a local
//!   database; a non-empty database short-circuits the crawl entirely,
//!   so a completed (or interrupted) prior run is reused without
//!   network activity.

use std::collections::{HashSet, VecDeque};

use futures::{StreamExt, stream};
use scraper::{Html, Selector};
use tracing::{info, instrument, warn};
use url::Url;

use crate::config::SpiderConfig;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::filter::{self, SkipPatterns};
use crate::paths::{self, PathStore};
use crate::store::{CrawlStore, Database, MemoryStore, PageRecord};

/// Discover paths by crawling, with transient state
///
/// Fast path: a cache artifact younger than `max_age_days` is loaded
/// and returned without any network activity, since a full crawl is
/// expensive.
#[instrument(skip(config), fields(base_url = %config.base_url))]
pub async fn discover(config: &SpiderConfig) -> Result<PathStore> {
    if !config.refresh && paths::is_fresh(&config.cache_file, config.max_age_days).await {
        info!("using existing path cache at {}", config.cache_file.display());
        return Ok(PathStore::load(&config.cache_file).await?);
    }

    info!("starting crawl of {}", config.base_url);
    crawl(config, &MemoryStore::new()).await
}

/// Discover paths by crawling, with database-backed state
///
/// A non-empty database is treated as a completed prior crawl and
/// replayed into the path store directly. With `refresh` set the
/// recorded state is cleared and the site is crawled again.
#[instrument(skip(config), fields(base_url = %config.base_url))]
pub async fn discover_persistent(config: &SpiderConfig) -> Result<PathStore> {
    let db = Database::new_from_path(&config.database_path).await?;

    if config.refresh {
        info!("refresh requested, clearing recorded crawl state");
        db.clear().await?;
    } else if !db.is_empty().await? {
        info!(
            "reusing recorded crawl from {}",
            config.database_path.display()
        );
        let mut store = PathStore::new();
        for page in db.pages().await? {
            store.add_path(&page.path);
        }
        return Ok(store);
    }

    info!("starting crawl of {}", config.base_url);
    crawl(config, &db).await
}

/// Breadth-first traversal from `config.base_url`, recording every
/// visited page into `state`
async fn crawl<S: CrawlStore>(config: &SpiderConfig, state: &S) -> Result<PathStore> {
    let base = Url::parse(&config.base_url)?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "base URL {} must be http or https",
            config.base_url
        )));
    }
    let base_host = base
        .host_str()
        .ok_or_else(|| Error::Config(format!("base URL {} has no host", config.base_url)))?
        .to_string();

    let skips = SkipPatterns::compile(&config.skip_patterns)?;
    let fetcher = Fetcher::new(config)?;

    let mut store = PathStore::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut frontier: VecDeque<Url> = VecDeque::new();

    let mut start = base;
    start.set_fragment(None);
    visited.insert(start.as_str().to_string());
    frontier.push_back(start);

    let mut fetched = 0usize;
    while !frontier.is_empty() {
        let batch: Vec<Url> = frontier.drain(..).collect();
        let results = stream::iter(batch)
            .map(|url| {
                let fetcher = fetcher.clone();
                async move {
                    let outcome = fetcher.fetch_page(url.as_str()).await;
                    (url, outcome)
                }
            })
            .buffer_unordered(config.concurrency)
            .collect::<Vec<_>>()
            .await;

        for (url, outcome) in results {
            let page = match outcome {
                Ok(page) => page,
                Err(e) => {
                    warn!("skipping {}: {}", url, e);
                    continue;
                }
            };

            fetched += 1;
            store.add_path(url.path());
            state
                .record(&PageRecord::new(url.as_str(), url.path()))
                .await?;

            if !page.is_html {
                continue;
            }
            for link in extract_links(&page.body, &url, &base_host, &skips) {
                if visited.insert(link.as_str().to_string()) {
                    frontier.push_back(link);
                }
            }
        }
    }

    if fetched == 0 {
        return Err(Error::CrawlFailed(format!(
            "no pages could be fetched from {}",
            config.base_url
        )));
    }

    info!("crawl visited {} pages, {} distinct paths", fetched, store.len());
    Ok(store)
}

/// Extract the followable outbound links of a page
///
/// A link survives only if it resolves against the page URL, stays on
/// the base host over http(s), and passes the asset and skip filters.
fn extract_links(html: &str, page_url: &Url, base_host: &str, skips: &SkipPatterns) -> Vec<Url> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("static selector");

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_link(page_url, href) else {
            continue;
        };
        if url.host_str() != Some(base_host) {
            continue;
        }
        if filter::is_asset_path(url.path()) {
            continue;
        }
        if skips.matches(url.path()) {
            continue;
        }
        links.push(url);
    }
    links
}

/// Resolve a (possibly relative) href to an absolute URL worth
/// considering
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
