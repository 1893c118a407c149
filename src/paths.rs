//! # Path Store Module
//!
//! This module owns the mapping from normalized path keys to raw URL
//! paths that a discovery run produces, and its durable form: a JSON
//! object written to the configured cache file. The downstream
//! screenshot tool enumerates that object by key.
//!
//! ## Key Components
//!
//! - `path_key`: Pure normalization from a raw URL path to a
//!   filesystem-safe key
//! - `PathStore`: Insertion-ordered key to path mapping with JSON
//!   save/load
//! - `is_fresh`: File-age staleness check for the cache artifact

use std::path::Path;
use std::time::SystemTime;

use indexmap::IndexMap;
use tokio::fs;
use tracing::debug;

use crate::store::StorageError;

const SECS_PER_DAY: u64 = 24 * 3600;

/// Normalize a raw URL path into a filesystem-safe key
///
/// The site root maps to `"home"`. Any other path has its slashes
/// replaced with `__`, the artifacts of a leading and trailing slash
/// removed, and is lower-cased. The output never contains a `/`.
///
/// An empty input yields an empty key; callers should avoid it, but it
/// is not an error.
pub fn path_key(raw_path: &str) -> String {
    if raw_path == "/" {
        return "home".to_string();
    }

    let mut key = raw_path.replace('/', "__");
    if let Some(stripped) = key.strip_prefix("__") {
        key = stripped.to_string();
    }
    if let Some(stripped) = key.strip_suffix("__") {
        key = stripped.to_string();
    }
    key.to_lowercase()
}

/// Insertion-ordered mapping from normalized key to raw URL path
///
/// Exclusively owned by the running strategy during discovery; the JSON
/// artifact on disk is the durable representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathStore {
    entries: IndexMap<String, String>,
}

impl PathStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a discovered path
    ///
    /// The key is derived with [`path_key`]; the stored path is
    /// lower-cased. Two raw paths that normalize to the same key
    /// collapse to the later one.
    pub fn add_path(&mut self, raw_path: &str) {
        self.entries
            .insert(path_key(raw_path), raw_path.to_lowercase());
    }

    /// Number of distinct keys in the store
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the raw path recorded for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write the store to `path` as a JSON object, overwriting any
    /// existing file
    pub async fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json).await?;
        debug!("wrote {} paths to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Load a previously saved artifact
    ///
    /// Only the exact shape this crate writes is accepted: a JSON
    /// object with string values. Anything else is a storage error —
    /// the file is parsed, never evaluated.
    pub async fn load(path: &Path) -> Result<Self, StorageError> {
        let json = fs::read_to_string(path).await?;
        let entries: IndexMap<String, String> = serde_json::from_str(&json)?;
        Ok(Self { entries })
    }
}

impl<'a> IntoIterator for &'a PathStore {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Whether the cache artifact at `path` exists and is younger than
/// `max_age_days` days
///
/// Purely a file-age check; content is not inspected. Platforms
/// without a creation timestamp fall back to the modification time.
pub async fn is_fresh(path: &Path, max_age_days: u64) -> bool {
    let Ok(meta) = fs::metadata(path).await else {
        return false;
    };
    let Ok(created) = meta.created().or_else(|_| meta.modified()) else {
        return false;
    };
    match SystemTime::now().duration_since(created) {
        Ok(age) => age.as_secs() < max_age_days * SECS_PER_DAY,
        // A timestamp in the future counts as fresh
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_normalizes_to_home() {
        assert_eq!(path_key("/"), "home");
    }

    #[test]
    fn slashes_become_separators() {
        assert_eq!(path_key("/a/b"), "a__b");
        assert_eq!(path_key("/about/team"), "about__team");
    }

    #[test]
    fn trailing_slash_artifact_is_dropped() {
        assert_eq!(path_key("/a/b/"), "a__b");
    }

    #[test]
    fn keys_are_lower_cased() {
        assert_eq!(path_key("/A/B"), "a__b");
        assert_eq!(path_key("/About"), "about");
    }

    #[test]
    fn empty_input_is_tolerated() {
        assert_eq!(path_key(""), "");
    }

    #[test]
    fn keys_never_contain_slashes() {
        for raw in ["/", "/a", "/a/b/c/", "//", "/x//y", "/café/menu"] {
            assert!(!path_key(raw).contains('/'), "key for {raw:?}");
        }
    }

    #[test]
    fn add_path_lower_cases_and_overwrites() {
        let mut store = PathStore::new();
        store.add_path("/About");
        store.add_path("/about");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("about"), Some("/about"));
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut store = PathStore::new();
        store.add_path("/zebra");
        store.add_path("/");
        store.add_path("/apple");
        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zebra", "home", "apple"]);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.json");

        let mut store = PathStore::new();
        store.add_path("/");
        store.add_path("/about/team");
        store.add_path("/Contact");
        store.save(&file).await.unwrap();

        let loaded = PathStore::load(&file).await.unwrap();
        assert_eq!(loaded, store);
    }

    #[tokio::test]
    async fn empty_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.json");

        let store = PathStore::new();
        store.save(&file).await.unwrap();

        let loaded = PathStore::load(&file).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn load_rejects_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.json");

        tokio::fs::write(&file, "[1, 2, 3]").await.unwrap();
        assert!(matches!(
            PathStore::load(&file).await,
            Err(StorageError::Json(_))
        ));

        tokio::fs::write(&file, r#"{"home": 42}"#).await.unwrap();
        assert!(matches!(
            PathStore::load(&file).await,
            Err(StorageError::Json(_))
        ));
    }

    #[tokio::test]
    async fn load_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PathStore::load(&dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[tokio::test]
    async fn fresh_file_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.json");
        tokio::fs::write(&file, "{}").await.unwrap();

        assert!(is_fresh(&file, 5).await);
    }

    #[tokio::test]
    async fn zero_day_threshold_is_always_stale() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.json");
        tokio::fs::write(&file, "{}").await.unwrap();

        assert!(!is_fresh(&file, 0).await);
    }

    #[tokio::test]
    async fn missing_file_is_not_fresh() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_fresh(&dir.path().join("absent.json"), 5).await);
    }
}
