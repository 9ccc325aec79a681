//! Namespace index: a cache of which model files exist per
//! `namespace:version` directory.
//!
//! The index is the only long-lived shared mutable state in the crate.
//! Snapshots are immutable `Arc`-shared maps; rebuilds construct a fresh map
//! and swap it in, so readers see either the old or the fully-built new
//! snapshot, never a partial one. Writers invalidate only the keys they
//! touch, and the next read rebuilds exactly those keys.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use crate::core::file_io::has_extension;
use crate::base::constants::MODEL_EXTENSION;

/// Immutable view of the index: `namespace:version` → filenames.
pub type IndexSnapshot = Arc<IndexMap<String, Vec<String>>>;

struct IndexState {
    built: bool,
    snapshot: IndexSnapshot,
    stale: FxHashSet<String>,
}

/// Lazily built cache of the two-level workspace layout.
pub struct NamespaceIndex {
    root: PathBuf,
    state: RwLock<IndexState>,
}

impl NamespaceIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            state: RwLock::new(IndexState {
                built: false,
                snapshot: Arc::new(IndexMap::new()),
                stale: FxHashSet::default(),
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the index snapshot. With `refresh` the whole tree is rescanned
    /// and the cache replaced wholesale; otherwise the cached snapshot is
    /// returned, rebuilding it on first call and rescanning any invalidated
    /// keys.
    pub fn get(&self, refresh: bool) -> IndexSnapshot {
        {
            let state = self.state.read();
            if !refresh && state.built && state.stale.is_empty() {
                return Arc::clone(&state.snapshot);
            }
        }

        let mut state = self.state.write();
        // Another thread may have rebuilt while we waited for the lock.
        if refresh || !state.built {
            tracing::debug!(root = %self.root.display(), "rebuilding namespace index");
            state.snapshot = Arc::new(self.scan_all());
            state.built = true;
            state.stale.clear();
        } else if !state.stale.is_empty() {
            let mut rebuilt = (*state.snapshot).clone();
            for key in state.stale.drain() {
                tracing::trace!(%key, "rescanning stale namespace key");
                match Self::split_key(&key).and_then(|(ns, v)| self.scan_key(ns, v)) {
                    Some(filenames) => {
                        rebuilt.insert(key, filenames);
                    }
                    None => {
                        rebuilt.shift_remove(&key);
                    }
                }
            }
            state.snapshot = Arc::new(rebuilt);
        }
        Arc::clone(&state.snapshot)
    }

    /// Marks one `namespace:version` key stale. The next `get` rebuilds it.
    pub fn invalidate(&self, namespace: &str, version: &str) {
        let key = format!("{namespace}:{version}");
        self.state.write().stale.insert(key);
    }

    fn split_key(key: &str) -> Option<(&str, &str)> {
        key.split_once(':')
    }

    /// Recursive scan of the whole workspace. Directories not matching the
    /// two-level `namespace/version` convention are skipped, not errored.
    fn scan_all(&self) -> IndexMap<String, Vec<String>> {
        let mut index = IndexMap::new();
        for namespace in Self::subdirectories(&self.root) {
            let namespace_dir = self.root.join(&namespace);
            for version in Self::subdirectories(&namespace_dir) {
                if let Some(filenames) = self.scan_key(&namespace, &version) {
                    index.insert(format!("{namespace}:{version}"), filenames);
                }
            }
        }
        index
    }

    /// Scans one `namespace/version` directory. Returns `None` when the
    /// directory does not exist or holds no model files.
    fn scan_key(&self, namespace: &str, version: &str) -> Option<Vec<String>> {
        let dir = self.root.join(namespace).join(version);
        let entries = fs::read_dir(&dir).ok()?;

        let mut filenames: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter(|entry| has_extension(&entry.path(), MODEL_EXTENSION))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        if filenames.is_empty() {
            return None;
        }
        // read_dir order is platform-dependent; sort so snapshots are stable.
        filenames.sort();
        Some(filenames)
    }

    fn subdirectories(dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}
