//! Link filtering for crawl traversal
//!
//! Two guards keep a crawl on page-like URLs: a fixed denylist of
//! asset/media extensions that are never worth screenshotting, and the
//! user's configured skip patterns. Both are applied before a URL is
//! enqueued, so excluded resources are never requested.

use regex::Regex;

use crate::error::{Error, Result};

/// File extensions a crawl must never follow
const SKIP_EXTENSIONS: &[&str] = &[
    "flv", "swf", "png", "jpg", "gif", "asx", "zip", "rar", "tar", "7z",
    "gz", "jar", "js", "css", "dtd", "xsd", "ico", "raw", "mp3", "mp4",
    "wav", "wmv", "ape", "aac", "ac3", "wma", "aiff", "mpg", "mpeg",
    "avi", "mov", "ogg", "mkv", "mka", "asf", "mp2", "m1v", "m3u", "f4v",
    "pdf", "doc", "xls", "ppt", "pps", "bin", "exe", "rss", "xml",
];

/// Whether a URL path points at a known non-page asset
///
/// Matches on the extension of the final path segment,
/// case-insensitively. Paths without an extension are kept.
pub fn is_asset_path(url_path: &str) -> bool {
    let segment = url_path.rsplit('/').next().unwrap_or(url_path);
    let Some((_, ext)) = segment.rsplit_once('.') else {
        return false;
    };
    if ext.is_empty() {
        return false;
    }
    let ext = ext.to_ascii_lowercase();
    SKIP_EXTENSIONS.contains(&ext.as_str())
}

/// User-configured skip patterns, compiled once per discovery run
#[derive(Debug, Default)]
pub struct SkipPatterns {
    patterns: Vec<Regex>,
}

impl SkipPatterns {
    /// Compile the configured pattern strings
    ///
    /// Any pattern that fails to compile aborts the run; a silently
    /// dropped pattern would let excluded pages into the path set.
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| Error::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Whether any configured pattern matches the path
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }

    /// Whether no patterns are configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
