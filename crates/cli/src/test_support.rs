//! Fixtures for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tote_core::{Price, Product, ProductId, Rating};
use tote_storefront::catalog::{Catalog, CatalogError};
use tote_storefront::state::AppState;
use tote_storefront::storage::MemoryStore;

/// A product with a predictable title and the given price in cents.
#[allow(clippy::unwrap_used)]
pub fn product(id: i64, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Price::new(Decimal::new(cents, 2)).unwrap(),
        image: format!("https://fakestoreapi.com/img/{id}.jpg").parse().unwrap(),
        category: "electronics".to_string(),
        description: format!("Description of product {id}"),
        rating: Rating {
            rate: 4.5,
            count: 12,
        },
    }
}

/// In-memory catalog that can be switched offline.
pub struct TestCatalog {
    products: Vec<Product>,
    offline: AtomicBool,
}

impl TestCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            offline: AtomicBool::new(false),
        }
    }

    /// Fail every later request with a 503.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for TestCatalog {
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
        Ok(vec!["electronics".to_string()])
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.check()?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }
}

/// Hydrated state over `catalog` and an empty in-memory store.
pub async fn ready_state(catalog: Arc<TestCatalog>) -> AppState {
    let state = AppState::from_parts(catalog, Arc::new(MemoryStore::new()));
    state.hydrate().await;
    state
}

/// Captured command output as text.
#[allow(clippy::unwrap_used)]
pub fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}
