//! Fault-swallowing wrapper around a [`KeyValueStore`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::KeyValueStore;

/// Best-effort persistence used by the stores.
///
/// Nothing here returns an error. A failed or undecodable read is reported
/// as "absent", a failed write is logged and dropped. The only observable
/// effect of a storage fault is that a change does not survive a restart.
#[derive(Debug, Clone)]
pub struct PersistenceAdapter {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceAdapter {
    /// Wrap a key-value store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the raw string stored under `key`.
    pub async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read from storage, treating as absent");
                None
            }
        }
    }

    /// Store a raw string under `key`.
    pub async fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            error!(key, error = %e, "Failed to write to storage");
        }
    }

    /// Remove every stored key.
    pub async fn clear_all(&self) {
        match self.store.clear().await {
            Ok(()) => debug!("Cleared storage"),
            Err(e) => error!(error = %e, "Failed to clear storage"),
        }
    }

    /// Read and decode a JSON value stored under `key`.
    ///
    /// Returns `None` if the key is absent, unreadable, or does not decode.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Stored value is not valid, ignoring it");
                None
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    pub async fn save<T: Serialize + Sync>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write(key, &json).await,
            Err(e) => error!(key, error = %e, "Failed to encode value for storage"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        async fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_read_fault_is_absent() {
        let adapter = PersistenceAdapter::new(Arc::new(BrokenStore));
        assert!(adapter.read("cart_items").await.is_none());
        assert!(adapter.load::<Vec<u32>>("cart_items").await.is_none());
    }

    #[tokio::test]
    async fn test_write_and_clear_faults_are_swallowed() {
        let adapter = PersistenceAdapter::new(Arc::new(BrokenStore));
        adapter.write("cart_items", "[]").await;
        adapter.save("cart_items", &vec![1, 2]).await;
        adapter.clear_all().await;
    }

    #[tokio::test]
    async fn test_load_ignores_invalid_json() {
        let store = MemoryStore::with_entries([("cart_items", "{not json")]);
        let adapter = PersistenceAdapter::new(Arc::new(store));
        assert!(adapter.load::<Vec<u32>>("cart_items").await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::new(Arc::new(store.clone()));

        adapter.save("wishlist_items", &vec![3, 1, 2]).await;

        assert_eq!(store.peek("wishlist_items").as_deref(), Some("[3,1,2]"));
        assert_eq!(
            adapter.load::<Vec<u32>>("wishlist_items").await.unwrap(),
            vec![3, 1, 2]
        );
    }
}
