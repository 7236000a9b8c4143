//! File-backed key-value store.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go to a temporary file
//! in the same directory and are renamed over the target, so a crash during
//! a write leaves either the old or the new value, never a torn one.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{KeyValueStore, StorageError};

const EXTENSION: &str = "json";

/// A [`KeyValueStore`] that keeps one file per key under a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp = self.dir.join(format!("{key}.{EXTENSION}.tmp"));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                tokio::fs::remove_file(&path).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_directory_reads_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("not-created-yet"));
        assert!(store.get("cart_items").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        let store = FileStore::new(&dir);

        store.set("cart_items", "[]").await.unwrap();

        assert!(dir.join("cart_items.json").exists());
        assert!(!dir.join("cart_items.json.tmp").exists());
        assert_eq!(store.get("cart_items").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());

        store.set("wishlist_items", "[1]").await.unwrap();
        store.set("wishlist_items", "[2]").await.unwrap();
        assert_eq!(
            store.get("wishlist_items").await.unwrap().as_deref(),
            Some("[2]")
        );
    }

    #[tokio::test]
    async fn test_clear_removes_only_key_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        store.set("cart_items", "[]").await.unwrap();
        store.set("wishlist_items", "[]").await.unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "keep me").unwrap();

        store.clear().await.unwrap();

        assert!(store.get("cart_items").await.unwrap().is_none());
        assert!(store.get("wishlist_items").await.unwrap().is_none());
        assert!(tmp.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_clear_missing_directory_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("absent"));
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());

        let err = store.set("../escape", "x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(store.get("").await.is_err());
    }
}
