//! Product list filtering by category and free-text search.

use crate::types::Product;

/// Category and search criteria applied to a product listing.
///
/// Both criteria are optional; an empty filter matches everything. The
/// category must match exactly, the query is a case-insensitive substring
/// match against the title or the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    category: Option<String>,
    query: Option<String>,
}

impl ProductFilter {
    /// A filter that matches every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to products whose title or description mention `query`.
    ///
    /// Blank queries are ignored.
    #[must_use]
    pub fn query(mut self, query: &str) -> Self {
        let query = query.trim();
        self.query = (!query.is_empty()).then(|| query.to_lowercase());
        self
    }

    /// Whether no criteria are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.query.is_none()
    }

    /// Whether `product` passes every criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }
        self.query
            .as_deref()
            .is_none_or(|needle| product.mentions(needle))
    }

    /// Filter a listing, keeping the original order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}
