//! # Sitemap Discovery Strategy
//!
//! Reads the path set straight from the site's sitemap instead of
//! crawling. The sitemap location may be a URL or a local file; only
//! the text of `<loc>` elements is consumed, so both urlset and
//! sitemap-index documents work. Any failure here is fatal — path
//! discovery is a precondition for all downstream work, so a partial
//! sitemap must not be silently accepted.

use quick_xml::Reader;
use quick_xml::events::Event;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

use crate::config::SpiderConfig;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::filter::SkipPatterns;
use crate::paths::PathStore;
use crate::store::StorageError;

/// Discover paths by parsing the configured sitemap
#[instrument(skip(config), fields(sitemap = config.sitemap.as_deref()))]
pub async fn discover(config: &SpiderConfig) -> Result<PathStore> {
    let Some(location) = config.sitemap.as_deref() else {
        return Err(Error::Config(
            "sitemap strategy requires a sitemap location".to_string(),
        ));
    };

    let skips = SkipPatterns::compile(&config.skip_patterns)?;

    info!("reading sitemap from {}", location);
    let xml = if is_remote(location) {
        Fetcher::new(config)?.fetch_text(location).await?
    } else {
        fs::read_to_string(location)
            .await
            .map_err(StorageError::Io)?
    };

    let mut store = PathStore::new();
    for loc in parse_locations(&xml)? {
        let path = strip_aliases(&loc, &config.domain_aliases);
        if !skips.matches(&path) {
            store.add_path(&path);
        }
    }

    info!("sitemap yielded {} paths", store.len());
    Ok(store)
}

fn is_remote(location: &str) -> bool {
    Url::parse(location)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Collect the text content of every `<loc>` element, in document order
fn parse_locations(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut locations = Vec::new();
    let mut in_loc = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"loc" => in_loc = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"loc" => in_loc = false,
            Ok(Event::Text(t)) if in_loc => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::Parse(format!("bad loc text: {e}")))?;
                locations.push(text.into_owned());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Parse(format!(
                    "malformed sitemap at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }
    Ok(locations)
}

/// Remove the first occurrence of each configured domain alias,
/// turning an absolute sitemap entry into a site-relative path
fn strip_aliases(loc: &str, aliases: &[String]) -> String {
    let mut path = loc.to_string();
    for alias in aliases {
        path = path.replacen(alias.as_str(), "", 1);
    }
    path
}
