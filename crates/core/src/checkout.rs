//! Order summary and local checkout receipt.
//!
//! There is no payment backend: checking out only produces a receipt for the
//! current cart contents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;

/// Totals shown under the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Decimal,
    /// Shipping is always free.
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Summarize a cart.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        let subtotal = cart.total();
        let shipping = Decimal::ZERO;
        Self {
            item_count: cart.item_count(),
            subtotal,
            shipping,
            total: subtotal.checked_add(shipping).unwrap_or(Decimal::MAX),
        }
    }
}

/// Receipt for a locally confirmed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub reference: Uuid,
    pub placed_at: DateTime<Utc>,
    pub summary: OrderSummary,
}

impl OrderConfirmation {
    /// Confirm an order for `cart` now.
    ///
    /// Returns `None` for an empty cart.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }
        Some(Self {
            reference: Uuid::new_v4(),
            placed_at: Utc::now(),
            summary: OrderSummary::for_cart(cart),
        })
    }
}
