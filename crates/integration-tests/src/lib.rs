//! Integration tests for Tote.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tote-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `hydration` - Loading persisted collections and mutations made meanwhile
//! - `cart_store` / `wishlist_store` - Store operations through `AppState`
//! - `write_ordering` - Durable state after bursts of mutations
//! - `file_restart` - File-backed persistence across process restarts
//! - `catalog_browse` - Catalog filtering and error reporting
//!
//! This library holds the shared fixtures: sample products, an in-memory
//! catalog, and key-value stores that can stall or fail on demand.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;

use tote_core::{Price, Product, ProductFilter, ProductId, Rating};
use tote_storefront::catalog::{Catalog, CatalogError};
use tote_storefront::state::AppState;
use tote_storefront::storage::{KeyValueStore, MemoryStore, StorageError};

// =============================================================================
// Products
// =============================================================================

/// A product in `category` with the given price in cents.
pub fn product_in(id: i64, cents: i64, title: &str, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::from_cents(cents).unwrap(),
        image: format!("https://fakestoreapi.com/img/{id}.jpg").parse().unwrap(),
        category: category.to_string(),
        description: format!("{title} from the {category} department"),
        rating: Rating {
            rate: 4.0,
            count: 10,
        },
    }
}

/// An electronics product titled `Product {id}`.
pub fn product(id: i64, cents: i64) -> Product {
    product_in(id, cents, &format!("Product {id}"), "electronics")
}

/// A small catalog spanning several categories.
pub fn sample_products() -> Vec<Product> {
    vec![
        product_in(1, 10995, "Fjallraven Backpack", "men's clothing"),
        product_in(2, 2230, "Mens Casual Premium Slim Fit T-Shirts", "men's clothing"),
        product_in(5, 69500, "Dragon Station Chain Bracelet", "jewelery"),
        product_in(9, 6400, "WD 2TB Portable External Hard Drive", "electronics"),
        product_in(10, 10900, "SanDisk SSD PLUS 1TB", "electronics"),
        product_in(16, 2999, "Faux Leather Moto Biker Jacket", "women's clothing"),
    ]
}

// =============================================================================
// Catalog
// =============================================================================

/// In-memory catalog that can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    products: Vec<Product>,
    offline: AtomicBool,
}

impl FakeCatalog {
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            offline: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a server error.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        self.check()?;
        Ok(self.products.clone())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.check()?;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.check()?;
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.browse(&ProductFilter::new().category(category)).await
    }
}

// =============================================================================
// Key-value stores
// =============================================================================

/// Memory-backed store whose reads block until [`GatedStore::open`] is
/// called. Counts reads and writes.
#[derive(Debug)]
pub struct GatedStore {
    inner: MemoryStore,
    gate: watch::Sender<bool>,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl GatedStore {
    /// A closed gate over `inner`.
    pub fn new(inner: MemoryStore) -> Self {
        let (gate, _) = watch::channel(false);
        Self {
            inner,
            gate,
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
        }
    }

    /// Let pending and future reads through.
    pub fn open(&self) {
        self.gate.send_replace(true);
    }

    /// Number of reads issued (including ones still blocked).
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of writes performed.
    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear().await
    }
}

/// Store whose every operation fails. Counts write attempts.
#[derive(Debug, Default)]
pub struct FaultyStore {
    writes: AtomicUsize,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes attempted.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for FaultyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk unplugged".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Unavailable("disk unplugged".to_string()))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk unplugged".to_string()))
    }
}

// =============================================================================
// App state
// =============================================================================

/// App state over the sample catalog and `store`.
pub fn app_with_store(store: Arc<dyn KeyValueStore>) -> AppState {
    AppState::from_parts(Arc::new(FakeCatalog::new(sample_products())), store)
}

/// Hydrated app state over the sample catalog and a fresh memory store.
pub async fn ready_app() -> (AppState, MemoryStore) {
    let store = MemoryStore::new();
    let app = app_with_store(Arc::new(store.clone()));
    app.hydrate().await;
    (app, store)
}
