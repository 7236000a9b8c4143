//! Catalog product types.
//!
//! A [`Product`] is only ever built from data that has already been
//! validated (see the storefront catalog conversions), so the stores can
//! treat it as an opaque, immutable value.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Price, ProductId};

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating (e.g. 3.9 out of 5).
    pub rate: f64,
    /// Number of ratings the average is built from.
    pub count: u32,
}

/// A product as listed by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: Url,
    pub category: String,
    pub description: String,
    pub rating: Rating,
}

impl Product {
    /// Lowercased haystack check against title and description.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
