//! Wishlist collection.

use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::types::{Product, ProductId};

/// Mutations accepted by a [`Wishlist`].
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistOp {
    /// Append the product unless its id is already present.
    Add(Product),
    /// Drop the product with this id.
    Remove(ProductId),
    /// Drop every product.
    Clear,
}

/// Saved products, unique by id, in the order they were added.
///
/// Adding a product that is already present is a no-op: the stored copy is
/// never replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `product` if absent. Returns whether it was inserted.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Remove the product with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Whether a product with `id` is saved.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Drop every product.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Products in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Iterate over the products in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }
}

impl Collection for Wishlist {
    type Op = WishlistOp;

    fn apply(&mut self, op: WishlistOp) {
        match op {
            WishlistOp::Add(product) => {
                self.add(product);
            }
            WishlistOp::Remove(id) => {
                self.remove(id);
            }
            WishlistOp::Clear => self.clear(),
        }
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl From<Vec<Product>> for Wishlist {
    fn from(products: Vec<Product>) -> Self {
        let mut wishlist = Self::new();
        for product in products {
            wishlist.add(product);
        }
        wishlist
    }
}

impl From<Wishlist> for Vec<Product> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.items
    }
}

impl<'a> IntoIterator for &'a Wishlist {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::product;

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(product(1, 100)));
        assert!(!wishlist.add(product(1, 100)));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_add_never_updates_existing_entry() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product(1, 100));
        let mut changed = product(1, 900);
        changed.title = "Changed".to_string();
        wishlist.add(changed);

        assert_eq!(wishlist.items()[0].title, "Product 1");
    }

    #[test]
    fn test_remove_and_contains() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product(1, 100));
        wishlist.add(product(2, 100));

        assert!(wishlist.contains(ProductId::new(2)));
        assert!(!wishlist.remove(ProductId::new(3)));
        assert!(wishlist.remove(ProductId::new(2)));
        assert!(!wishlist.contains(ProductId::new(2)));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_json_layout_has_no_quantity() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product(5, 100));

        let value = serde_json::to_value(&wishlist).unwrap();
        let entry = &value.as_array().unwrap()[0];
        assert_eq!(entry["id"], 5);
        assert!(entry.get("quantity").is_none());
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let json = serde_json::to_string(&vec![product(1, 100), product(1, 200)]).unwrap();
        let wishlist: Wishlist = serde_json::from_str(&json).unwrap();
        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist.items()[0].price.amount(), rust_decimal::Decimal::ONE);
    }

    #[test]
    fn test_apply_dispatches_ops() {
        let mut wishlist = Wishlist::new();
        wishlist.apply(WishlistOp::Add(product(1, 100)));
        wishlist.apply(WishlistOp::Add(product(2, 100)));
        wishlist.apply(WishlistOp::Remove(ProductId::new(1)));
        assert_eq!(wishlist.len(), 1);

        wishlist.apply(WishlistOp::Clear);
        assert!(wishlist.is_empty());
    }
}
