// src/watch/store.rs

//! Durable storage for the change cache and the last invocation.
//!
//! Both live in one JSON document (`ruwnch.cache.json` by default):
//!
//! ```json
//! { "files": { "/abs/path": "<hex>" }, "last": ["ruwnch", "a.txt", "make"] }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{Result, RuwnchError};
use crate::fs::FileSystem;
use crate::watch::cache::ChangeCache;
use crate::watch::hash::Fingerprint;

/// Default location of the cache document, relative to the working directory.
pub const CACHE_FILE_PATH: &str = "ruwnch.cache.json";

/// On-disk shape of the cache document. Field names are fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument {
    #[serde(default)]
    pub files: BTreeMap<String, Fingerprint>,

    /// Argument list of the last invocation, `[program, files, commands]`.
    /// Older documents store an empty string here when nothing was saved.
    #[serde(default, deserialize_with = "deserialize_last")]
    pub last: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LastField {
    List(Vec<String>),
    Text(String),
}

fn deserialize_last<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LastField>::deserialize(deserializer)? {
        Some(LastField::List(list)) => list,
        Some(LastField::Text(_)) | None => Vec::new(),
    })
}

fn read_document(fs: &dyn FileSystem, path: &Path) -> Result<Option<CacheDocument>> {
    if !fs.exists(path) {
        return Ok(None);
    }
    let contents = fs.read_to_string(path)?;
    let doc = serde_json::from_str(&contents)?;
    Ok(Some(doc))
}

fn write_document(fs: &dyn FileSystem, path: &Path, doc: &CacheDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    fs.write(path, json.as_bytes())?;
    Ok(())
}

/// Create an empty cache document at `path` if none exists yet.
pub fn ensure_cache_file(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    if fs.exists(path) {
        return Ok(());
    }
    write_document(fs, path, &CacheDocument::default())?;
    info!(path = ?path, "generated missing cache file");
    Ok(())
}

/// Read the stored last invocation, if any.
///
/// A document that exists but cannot be parsed is a configuration error
/// here: the caller explicitly asked to replay it.
pub fn load_last_invocation(fs: &dyn FileSystem, path: &Path) -> Result<Option<Vec<String>>> {
    let doc = read_document(fs, path).map_err(|err| {
        RuwnchError::ConfigError(format!("cache file {:?} is unreadable: {err}", path))
    })?;

    Ok(doc.map(|d| d.last).filter(|last| !last.is_empty()))
}

/// Store `argv` as the last invocation, keeping the `files` map intact.
pub fn save_last_invocation(fs: &dyn FileSystem, path: &Path, argv: &[String]) -> Result<()> {
    let mut doc = existing_or_default(fs, path);
    doc.last = argv.to_vec();
    write_document(fs, path, &doc)?;
    debug!(?argv, "saved last invocation");
    Ok(())
}

fn existing_or_default(fs: &dyn FileSystem, path: &Path) -> CacheDocument {
    match read_document(fs, path) {
        Ok(Some(doc)) => doc,
        Ok(None) => CacheDocument::default(),
        Err(err) => {
            warn!(path = ?path, error = %err, "cache file unreadable; starting from an empty document");
            CacheDocument::default()
        }
    }
}

/// Abstract storage for the change cache.
pub trait CacheStore: Send + Sync {
    /// Load the persisted fingerprints. Never fails on a missing or corrupt
    /// document; those yield an empty cache.
    fn load(&self) -> Result<ChangeCache>;

    /// Write the full cache back. Called once per cycle.
    fn persist(&mut self, cache: &ChangeCache) -> Result<()>;

    /// Whether fingerprints survive across runs.
    fn is_persistent(&self) -> bool;
}

/// Stores fingerprints in the JSON cache document.
pub struct JsonCacheStore {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl JsonCacheStore {
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }
}

impl CacheStore for JsonCacheStore {
    fn load(&self) -> Result<ChangeCache> {
        let doc = existing_or_default(self.fs.as_ref(), &self.path);
        info!(
            path = ?self.path,
            entries = doc.files.len(),
            "loaded fingerprint cache (file)"
        );
        Ok(ChangeCache::from_entries(doc.files))
    }

    fn persist(&mut self, cache: &ChangeCache) -> Result<()> {
        let mut doc = existing_or_default(self.fs.as_ref(), &self.path);
        doc.files = cache.entries().clone();
        write_document(self.fs.as_ref(), &self.path, &doc)?;
        debug!(path = ?self.path, entries = cache.len(), "persisted fingerprint cache (file)");
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        true
    }
}

/// Used when `enableHashCache` is off: every run starts empty and nothing is
/// written back. The in-memory [`ChangeCache`] still suppresses repeats
/// within a run.
#[derive(Debug, Default)]
pub struct MemoryCacheStore;

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Result<ChangeCache> {
        info!("fingerprint cache disabled; starting with an empty cache (memory)");
        Ok(ChangeCache::new())
    }

    fn persist(&mut self, _cache: &ChangeCache) -> Result<()> {
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
