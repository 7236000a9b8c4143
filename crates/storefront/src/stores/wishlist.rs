//! Wishlist store.

use tote_core::{Product, ProductId, Wishlist, WishlistOp};

use super::{Phase, PersistedStore};
use crate::storage::{PersistenceAdapter, WISHLIST_KEY};

/// Saved products, persisted under [`WISHLIST_KEY`].
///
/// Same lifecycle and write policy as [`CartStore`](super::CartStore), with
/// add-if-absent instead of quantity merging.
#[derive(Clone)]
pub struct WishlistStore {
    store: PersistedStore<Wishlist>,
}

impl WishlistStore {
    /// Create an empty, uninitialized wishlist store.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(adapter: PersistenceAdapter) -> Self {
        Self {
            store: PersistedStore::new(adapter, WISHLIST_KEY),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start loading the persisted wishlist in the background.
    ///
    /// Runs once per store; later calls do nothing.
    pub fn initialize(&self) {
        self.store.initialize();
    }

    /// Load the persisted wishlist and wait for it.
    pub async fn hydrate(&self) {
        self.store.hydrate().await;
    }

    /// Whether the persisted wishlist has been loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Current hydration phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.store.phase()
    }

    /// Wait until the persisted wishlist has been loaded.
    pub async fn wait_ready(&self) {
        self.store.wait_ready().await;
    }

    /// Wait until every queued write has been performed.
    pub async fn flush(&self) {
        self.store.flush().await;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Save `product` unless it is already saved.
    pub fn add(&self, product: Product) {
        self.store.apply(WishlistOp::Add(product));
    }

    /// Forget the product with `id`; unknown ids are ignored.
    pub fn remove(&self, id: ProductId) {
        self.store.apply(WishlistOp::Remove(id));
    }

    /// Save `product` if absent, otherwise forget it.
    ///
    /// Returns whether the product is saved afterwards.
    pub fn toggle(&self, product: Product) -> bool {
        self.store.apply_with(|wishlist| {
            if wishlist.contains(product.id) {
                (Some(WishlistOp::Remove(product.id)), false)
            } else {
                (Some(WishlistOp::Add(product)), true)
            }
        })
    }

    /// Forget every product.
    pub fn clear(&self) {
        self.store.apply(WishlistOp::Clear);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether a product with `id` is saved.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.store.read(|wishlist| wishlist.contains(id))
    }

    /// Snapshot of the saved products in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<Product> {
        self.store.read(|wishlist| wishlist.items().to_vec())
    }

    /// Snapshot of the whole wishlist.
    #[must_use]
    pub fn wishlist(&self) -> Wishlist {
        self.store.snapshot()
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read(Wishlist::len)
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.read(Wishlist::is_empty)
    }
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("phase", &self.phase())
            .field("items", &self.len())
            .finish()
    }
}
