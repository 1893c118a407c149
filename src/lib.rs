//! # pathscout - Site Path Discovery for Visual Regression Tooling
//!
//! This crate discovers the set of distinct URL paths on a target site
//! that a visual-regression tool will later screenshot and compare. It
//! chooses between parsing the site's sitemap and breadth-first
//! crawling, normalizes raw paths into stable filesystem-safe keys,
//! and caches the discovered set as a JSON artifact with a time-based
//! staleness policy.
//!
//! ## Features
//!
//! - Three interchangeable discovery strategies selected by
//!   configuration: sitemap, in-memory crawl, database-backed crawl
//! - Filesystem-safe path keys (`/about/team` becomes `about__team`)
//! - Bounded-concurrency crawling with asset and skip-pattern
//!   filtering applied before a request is issued
//! - Cache artifact reuse with a configurable freshness window
//! - Persistent crawl state in a local libsql database, so a prior
//!   crawl can be reused or resumed across runs
//! - Async API with Tokio
//! - Robust error handling and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use pathscout::config::SpiderConfig;
//! use pathscout::discover;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SpiderConfig::builder()
//!         .base_url("https://example.com")
//!         .cache_file("spider_paths.json")
//!         .max_age_days(7)
//!         .build();
//!
//!     if let Some(store) = discover::determine_paths(&config).await? {
//!         for (key, path) in store.iter() {
//!             println!("{key} -> {path}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod error;

pub mod config;
pub mod crawler;
pub mod discover;
pub mod fetch;
pub mod filter;
pub mod paths;
pub mod sitemap;
pub mod store;

pub use error::{Error, Result};

/// Re-export of the common types for public use
pub mod prelude {
    pub use crate::config::{SpiderConfig, StorageMode};
    pub use crate::discover::determine_paths;
    pub use crate::error::{Error, Result};
    pub use crate::paths::PathStore;
}
