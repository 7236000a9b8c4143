//! On-device key-value storage.
//!
//! # Layers
//!
//! - [`KeyValueStore`] - the raw primitive (get/set/clear of strings) that
//!   may fail. [`MemoryStore`] and [`FileStore`] implement it.
//! - [`PersistenceAdapter`] - wraps a store and never fails: read faults
//!   surface as "absent", write faults are logged and dropped.
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | [`CART_KEY`] | JSON array of cart lines (product fields plus `quantity`) |
//! | [`WISHLIST_KEY`] | JSON array of products |

mod adapter;
mod file;
mod memory;

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

pub use adapter::PersistenceAdapter;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key for the cart collection.
pub const CART_KEY: &str = "cart_items";

/// Storage key for the wishlist collection.
pub const WISHLIST_KEY: &str = "wishlist_items";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The backend cannot serve requests right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A durable key → string store.
///
/// All methods take `&self`; implementations use interior mutability.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove every key.
    async fn clear(&self) -> Result<(), StorageError>;
}
