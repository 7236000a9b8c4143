//! Fixtures for unit tests.

use rust_decimal::Decimal;
use url::Url;

use crate::types::{Price, Product, ProductId, Rating};

/// A product with a predictable title and the given price in cents.
#[allow(clippy::unwrap_used)]
pub fn product(id: i64, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Price::new(Decimal::new(cents, 2)).unwrap(),
        image: Url::parse(&format!("https://fakestoreapi.com/img/{id}.jpg")).unwrap(),
        category: "electronics".to_string(),
        description: format!("Description of product {id}"),
        rating: Rating {
            rate: 4.1,
            count: 120,
        },
    }
}
