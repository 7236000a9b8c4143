//! Remote product catalog.
//!
//! # Architecture
//!
//! - [`Catalog`] is the read-only contract the rest of the app depends on,
//!   so tests and other backends can stand in for the network.
//! - [`FakeStoreClient`] implements it against the Fake Store REST API using
//!   `reqwest`, validating every product once at this boundary.
//! - Responses are cached in memory via `moka` (TTL from configuration).
//!
//! # Example
//!
//! ```rust,ignore
//! use tote_storefront::catalog::{Catalog, FakeStoreClient};
//!
//! let client = FakeStoreClient::new(&config.catalog)?;
//! let products = client.list_by_category("electronics").await?;
//! ```

mod cache;
mod client;
mod conversions;

use async_trait::async_trait;
use thiserror::Error;

use tote_core::{Product, ProductFilter, ProductId};

pub use client::FakeStoreClient;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Product data failed validation.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: i64, reason: String },

    /// The configured base URL cannot have paths appended.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Read-only access to catalog products.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Every product.
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError>;

    /// A single product.
    async fn get_by_id(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Every category name.
    async fn list_categories(&self) -> Result<Vec<String>, CatalogError>;

    /// Products in one category.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError>;

    /// Products matching `filter`, in catalog order.
    async fn browse(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        let products = self.list_all().await?;
        Ok(products.into_iter().filter(|p| filter.matches(p)).collect())
    }
}
