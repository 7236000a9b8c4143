//! Shopping cart collection.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s, unique by product id, in
//! the order the products were first added. All invariants are kept by the
//! mutation methods; deserialization goes through the same path so a
//! hand-edited or legacy payload with duplicate ids is merged on load.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::types::{Product, ProductId, Quantity};

/// A product in the cart together with how many units were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    /// Create a new line.
    #[must_use]
    pub const fn new(product: Product, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    /// Product id of the line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// Mutations accepted by a [`Cart`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartOp {
    /// Merge `quantity` units of `product` into the cart.
    Add { product: Product, quantity: Quantity },
    /// Drop the line for a product.
    Remove(ProductId),
    /// Replace a line's quantity; zero or below removes the line.
    SetQuantity { id: ProductId, quantity: i64 },
    /// Drop every line.
    Clear,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from lines, merging any duplicate product ids into the
    /// first occurrence.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line.product, line.quantity);
        }
        cart
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the same id has its quantity increased (the
    /// stored product data is left as it was); otherwise a new line is
    /// appended at the end.
    pub fn add(&mut self, product: Product, quantity: Quantity) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::new(product, quantity));
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        self.lines.len() != before
    }

    /// Set the quantity of the line for `id` in place.
    ///
    /// A quantity of zero or below removes the line. Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        match Quantity::try_from(quantity) {
            Ok(quantity) => {
                if let Some(line) = self.line_mut(id) {
                    line.quantity = quantity;
                }
            }
            Err(_) => {
                self.remove(id);
            }
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price × quantity` over all lines, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, |sum, line| {
                sum.checked_add(line).unwrap_or(Decimal::MAX)
            })
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Whether a line for `id` exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }
}

impl Collection for Cart {
    type Op = CartOp;

    fn apply(&mut self, op: CartOp) {
        match op {
            CartOp::Add { product, quantity } => self.add(product, quantity),
            CartOp::Remove(id) => {
                self.remove(id);
            }
            CartOp::SetQuantity { id, quantity } => self.set_quantity(id, quantity),
            CartOp::Clear => self.clear(),
        }
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
