// src/watch/cache.rs

use std::collections::BTreeMap;

use tracing::debug;

use crate::watch::hash::Fingerprint;

/// Last-seen fingerprint per absolute path.
///
/// Owned by the poll loop for the lifetime of a run. Entries are kept in a
/// `BTreeMap` so a persisted cache serializes identically for identical
/// state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeCache {
    entries: BTreeMap<String, Fingerprint>,
}

impl ChangeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, Fingerprint>) -> Self {
        Self { entries }
    }

    /// True if `path` has never been seen, or was last seen with a different
    /// fingerprint.
    pub fn has_changed(&self, path: &str, fingerprint: &Fingerprint) -> bool {
        match self.entries.get(path) {
            Some(previous) => previous != fingerprint,
            None => true,
        }
    }

    /// Record the latest fingerprint for `path`, whether or not it changed.
    pub fn update(&mut self, path: &str, fingerprint: Fingerprint) {
        if let Some(previous) = self.entries.insert(path.to_string(), fingerprint) {
            debug!(file = %path, previous = %previous, "replaced cached fingerprint");
        }
    }

    pub fn get(&self, path: &str) -> Option<&Fingerprint> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, Fingerprint> {
        &self.entries
    }
}
