//! Flat-file JSON persistence
//!
//! Each collection is one JSON file holding a list of records, read and
//! replaced whole on every operation. There is no locking: concurrent
//! writers race and the last write wins. This is acceptable at the
//! documented load (a handful of simultaneous writers at most) and is a
//! known hardening point.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Whole-collection read/replace on a single JSON file.
///
/// Failure semantics follow the store contract: unreadable or malformed
/// files degrade to an empty collection with a logged warning, and write
/// failures are logged and swallowed. Callers never observe a persistence
/// error, which means the in-memory effect and the on-disk effect can
/// diverge after a failed save.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file with an empty collection if it is missing.
    pub async fn ensure_exists(&self) {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return;
        }
        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %self.path.display(), error = %e, "Failed to create data directory");
                return;
            }
        }
        if let Err(e) = tokio::fs::write(&self.path, "[]").await {
            warn!(path = %self.path.display(), error = %e, "Failed to seed collection file");
        }
    }

    /// Load the whole collection, degrading to empty on any failure.
    pub async fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read collection, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed collection, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace the whole collection on disk, swallowing write failures.
    pub async fn save<T: Serialize>(&self, items: &[T]) {
        let serialized = match serde_json::to_string_pretty(items) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to serialize collection");
                return;
            }
        };

        match tokio::fs::write(&self.path, serialized).await {
            Ok(()) => debug!(path = %self.path.display(), count = items.len(), "Collection saved"),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to save collection");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("missing.json"));
        let items: Vec<i64> = store.load().await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "{not json").await.unwrap();
        let store = JsonStore::new(path);
        let items: Vec<i64> = store.load().await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nums.json"));
        store.save(&[1i64, 2, 3]).await;
        let items: Vec<i64> = store.load().await;
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_ensure_exists_seeds_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("sub").join("users.json"));
        store.ensure_exists().await;
        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(raw, "[]");
    }
}
