//! Cart store.

use rust_decimal::Decimal;

use tote_core::{
    Cart, CartLine, CartOp, OrderConfirmation, OrderSummary, Product, ProductId, Quantity,
};

use super::{Phase, PersistedStore};
use crate::storage::{CART_KEY, PersistenceAdapter};

/// The shopping cart, persisted under [`CART_KEY`].
///
/// Cloning is cheap; clones share the same cart. Mutations return as soon as
/// the in-memory cart is updated; the durable write happens on the store's
/// write queue and its outcome is never reported back.
#[derive(Clone)]
pub struct CartStore {
    store: PersistedStore<Cart>,
}

impl CartStore {
    /// Create an empty, uninitialized cart store.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(adapter: PersistenceAdapter) -> Self {
        Self {
            store: PersistedStore::new(adapter, CART_KEY),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start loading the persisted cart in the background.
    ///
    /// Runs once per store; later calls do nothing.
    pub fn initialize(&self) {
        self.store.initialize();
    }

    /// Load the persisted cart and wait for it.
    pub async fn hydrate(&self) {
        self.store.hydrate().await;
    }

    /// Whether the persisted cart has been loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Current hydration phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.store.phase()
    }

    /// Wait until the persisted cart has been loaded.
    pub async fn wait_ready(&self) {
        self.store.wait_ready().await;
    }

    /// Wait until every queued write has been performed.
    pub async fn flush(&self) {
        self.store.flush().await;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product`, merging into an existing line.
    pub fn add(&self, product: Product, quantity: Quantity) {
        self.store.apply(CartOp::Add { product, quantity });
    }

    /// Add a single unit of `product`.
    pub fn add_one(&self, product: Product) {
        self.add(product, Quantity::ONE);
    }

    /// Remove the line for `id`; unknown ids are ignored.
    pub fn remove(&self, id: ProductId) {
        self.store.apply(CartOp::Remove(id));
    }

    /// Set the quantity of the line for `id`. Zero or below removes it.
    pub fn set_quantity(&self, id: ProductId, quantity: i64) {
        self.store.apply(CartOp::SetQuantity { id, quantity });
    }

    /// Remove every line.
    pub fn clear(&self) {
        self.store.apply(CartOp::Clear);
    }

    /// Confirm an order for the current cart and empty it.
    ///
    /// Returns `None` (and leaves the cart alone) if the cart is empty.
    pub fn checkout(&self) -> Option<OrderConfirmation> {
        self.store.apply_with(|cart| match OrderConfirmation::for_cart(cart) {
            Some(confirmation) => (Some(CartOp::Clear), Some(confirmation)),
            None => (None, None),
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.store.read(Cart::total)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.store.read(Cart::item_count)
    }

    /// Subtotal, shipping, and total for the current cart.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        self.store.read(OrderSummary::for_cart)
    }

    /// Snapshot of the lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLine> {
        self.store.read(|cart| cart.lines().to_vec())
    }

    /// Snapshot of the whole cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.store.snapshot()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<CartLine> {
        self.store.read(|cart| cart.get(id).cloned())
    }

    /// Whether the cart has a line for `id`.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.store.read(|cart| cart.contains(id))
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read(Cart::len)
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.read(Cart::is_empty)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("phase", &self.phase())
            .field("lines", &self.len())
            .finish()
    }
}
