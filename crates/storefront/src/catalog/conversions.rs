//! Conversions from raw API payloads to validated domain types.
//!
//! The API is loosely typed (missing descriptions, odd ratings), so payloads
//! are decoded into permissive `Api*` structs first and then checked once
//! here. Nothing downstream re-validates.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use tote_core::{Price, Product, ProductId, Rating};

use super::CatalogError;

/// Product as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    pub id: i64,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: Option<ApiRating>,
}

/// Rating as returned by the API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiRating {
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub count: u32,
}

impl TryFrom<ApiProduct> for Product {
    type Error = CatalogError;

    fn try_from(api: ApiProduct) -> Result<Self, Self::Error> {
        let invalid = |reason: String| CatalogError::InvalidProduct { id: api.id, reason };

        let title = api.title.trim();
        if title.is_empty() {
            return Err(invalid("title is empty".to_string()));
        }

        let price = Price::new(api.price).map_err(|e| invalid(e.to_string()))?;
        let image = Url::parse(&api.image)
            .map_err(|e| invalid(format!("image URL {:?}: {e}", api.image)))?;

        let rating = api.rating.map_or(
            Rating {
                rate: 0.0,
                count: 0,
            },
            |r| Rating {
                rate: if r.rate.is_finite() { r.rate.clamp(0.0, 5.0) } else { 0.0 },
                count: r.count,
            },
        );

        Ok(Self {
            id: ProductId::new(api.id),
            title: title.to_owned(),
            price,
            image,
            category: api.category,
            description: api.description,
            rating,
        })
    }
}

/// Convert a listing, skipping (and logging) products that fail validation.
pub fn convert_products(products: Vec<ApiProduct>) -> Vec<Product> {
    products
        .into_iter()
        .filter_map(|api| match Product::try_from(api) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(error = %e, "Skipping invalid catalog product");
                None
            }
        })
        .collect()
}
