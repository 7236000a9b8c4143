//! Application state shared across front-end entry points.

use std::sync::Arc;

use tracing::{info, instrument};

use tote_core::{Product, ProductFilter, ProductId};

use crate::catalog::{Catalog, FakeStoreClient};
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::storage::{FileStore, KeyValueStore, PersistenceAdapter};
use crate::stores::{CartStore, WishlistStore};

/// Application state shared across all entry points.
///
/// This struct is cheaply cloneable via `Arc` and owns the single cart and
/// wishlist instances for the process, plus the catalog they draw from.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Arc<dyn Catalog>,
    adapter: PersistenceAdapter,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl AppState {
    /// Create application state backed by the Fake Store API and a
    /// file-backed store in `config.data_dir`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, AppError> {
        let catalog = FakeStoreClient::new(&config.catalog)?;
        let store = FileStore::new(config.data_dir.clone());
        Ok(Self::from_parts(Arc::new(catalog), Arc::new(store)))
    }

    /// Create application state from explicit parts.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn from_parts(catalog: Arc<dyn Catalog>, store: Arc<dyn KeyValueStore>) -> Self {
        let adapter = PersistenceAdapter::new(store);
        let cart = CartStore::new(adapter.clone());
        let wishlist = WishlistStore::new(adapter.clone());

        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                adapter,
                cart,
                wishlist,
            }),
        }
    }

    /// Start loading both collections in the background.
    pub fn initialize(&self) {
        self.inner.cart.initialize();
        self.inner.wishlist.initialize();
    }

    /// Load both collections and wait until they are ready.
    pub async fn hydrate(&self) {
        tokio::join!(self.inner.cart.hydrate(), self.inner.wishlist.hydrate());
    }

    /// Wait until both collections have been loaded.
    pub async fn wait_ready(&self) {
        tokio::join!(
            self.inner.cart.wait_ready(),
            self.inner.wishlist.wait_ready()
        );
    }

    /// Whether both collections have been loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.cart.is_ready() && self.inner.wishlist.is_ready()
    }

    /// Wait until every queued write has been performed.
    pub async fn flush(&self) {
        tokio::join!(self.inner.cart.flush(), self.inner.wishlist.flush());
    }

    /// Empty both collections and wipe the backing store.
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        self.inner.cart.clear();
        self.inner.wishlist.clear();
        self.flush().await;
        self.inner.adapter.clear_all().await;
        info!("Local storefront data reset");
    }

    /// Products matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached.
    pub async fn browse(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        Ok(self.inner.catalog.browse(filter).await?)
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the catalog cannot
    /// be reached.
    pub async fn product(&self, id: ProductId) -> Result<Product, AppError> {
        Ok(self.inner.catalog.get_by_id(id).await?)
    }

    /// Every category name.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached.
    pub async fn categories(&self) -> Result<Vec<String>, AppError> {
        Ok(self.inner.catalog.list_categories().await?)
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }
}
