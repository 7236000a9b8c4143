//! Integration tests for loading persisted collections.
//!
//! These tests cover the window between startup and the moment stored data
//! arrives: mutations made meanwhile must survive, and nothing may be written
//! over stored data before it has been read.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use tote_core::{CartLine, Product, ProductId, Quantity};
use tote_integration_tests::{FaultyStore, GatedStore, app_with_store, product};
use tote_storefront::storage::{CART_KEY, MemoryStore, WISHLIST_KEY};
use tote_storefront::stores::Phase;

fn stored_cart(store: &MemoryStore) -> Vec<CartLine> {
    serde_json::from_str(&store.peek(CART_KEY).unwrap()).unwrap()
}

fn stored_wishlist(store: &MemoryStore) -> Vec<Product> {
    serde_json::from_str(&store.peek(WISHLIST_KEY).unwrap()).unwrap()
}

fn seeded_memory() -> MemoryStore {
    let cart = vec![CartLine::new(product(1, 1000), Quantity::new(2).unwrap())];
    let wishlist = vec![product(7, 700)];
    MemoryStore::with_entries([
        (CART_KEY, serde_json::to_string(&cart).unwrap()),
        (WISHLIST_KEY, serde_json::to_string(&wishlist).unwrap()),
    ])
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn test_hydrate_restores_stored_collections() {
    let store = seeded_memory();
    let app = app_with_store(Arc::new(store.clone()));

    assert_eq!(app.cart().phase(), Phase::Uninitialized);
    assert!(app.cart().is_empty());

    app.hydrate().await;

    assert!(app.is_ready());
    assert_eq!(app.cart().phase(), Phase::Ready);
    assert_eq!(app.cart().get(ProductId::new(1)).unwrap().quantity.get(), 2);
    assert!(app.wishlist().contains(ProductId::new(7)));
}

#[tokio::test]
async fn test_hydrate_without_stored_data_starts_empty() {
    let store = MemoryStore::new();
    let app = app_with_store(Arc::new(store.clone()));

    app.hydrate().await;
    app.flush().await;

    assert!(app.is_ready());
    assert!(app.cart().is_empty());
    assert!(app.wishlist().is_empty());
    // Nothing was changed, so nothing was written
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_corrupt_stored_data_hydrates_empty() {
    let store = MemoryStore::with_entries([(CART_KEY, "{not json"), (WISHLIST_KEY, "42")]);
    let app = app_with_store(Arc::new(store));

    app.hydrate().await;

    assert!(app.is_ready());
    assert!(app.cart().is_empty());
    assert!(app.wishlist().is_empty());
}

// =============================================================================
// Mutations while loading
// =============================================================================

#[tokio::test]
async fn test_cart_add_before_ready_merges_with_stored_items() {
    let memory = seeded_memory();
    let gated = Arc::new(GatedStore::new(memory.clone()));
    let app = app_with_store(gated.clone());

    app.initialize();
    assert_eq!(app.cart().phase(), Phase::Loading);

    app.cart().add_one(product(3, 300));
    assert!(!app.cart().is_ready());
    assert!(app.cart().contains(ProductId::new(3)));

    gated.open();
    app.wait_ready().await;
    app.flush().await;

    let ids: Vec<i64> = app.cart().items().iter().map(|l| l.id().as_i64()).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(stored_cart(&memory), app.cart().items());
}

#[tokio::test]
async fn test_wishlist_toggle_before_ready_replays_decision() {
    let memory = seeded_memory();
    let gated = Arc::new(GatedStore::new(memory.clone()));
    let app = app_with_store(gated.clone());

    app.initialize();
    // Product 7 is stored but not loaded yet, so this reads as "absent"
    assert!(app.wishlist().toggle(product(7, 700)));

    gated.open();
    app.wait_ready().await;
    app.flush().await;

    // The add replays on top of the stored entry, which stays single
    assert_eq!(app.wishlist().len(), 1);
    assert_eq!(stored_wishlist(&memory).len(), 1);
}

#[tokio::test]
async fn test_no_write_reaches_storage_while_loading() {
    let memory = seeded_memory();
    let gated = Arc::new(GatedStore::new(memory.clone()));
    let app = app_with_store(gated.clone());

    app.initialize();
    app.cart().add_one(product(3, 300));
    app.cart().clear();
    app.wishlist().add(product(4, 400));

    // Give the runtime a chance to run anything it has queued
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(gated.sets(), 0);
    assert_eq!(stored_cart(&memory).len(), 1);

    gated.open();
    app.wait_ready().await;
    app.flush().await;

    // Clear replayed after the load: the stored line is gone too
    assert!(app.cart().is_empty());
    assert!(stored_cart(&memory).is_empty());
    assert_eq!(stored_wishlist(&memory).len(), 2);
}

#[tokio::test]
async fn test_initialize_twice_loads_once() {
    let gated = Arc::new(GatedStore::new(MemoryStore::new()));
    let app = app_with_store(gated.clone());

    app.initialize();
    app.initialize();
    gated.open();
    app.wait_ready().await;
    app.hydrate().await;

    // One read per collection
    assert_eq!(gated.gets(), 2);
}

// =============================================================================
// Storage faults
// =============================================================================

#[tokio::test]
async fn test_read_fault_hydrates_empty_and_ready() {
    let app = app_with_store(Arc::new(FaultyStore::new()));

    app.hydrate().await;

    assert!(app.is_ready());
    assert!(app.cart().is_empty());
}

#[tokio::test]
async fn test_write_faults_leave_memory_intact() {
    let faulty = Arc::new(FaultyStore::new());
    let app = app_with_store(faulty.clone());
    app.hydrate().await;

    app.cart().add(product(1, 1000), Quantity::new(3).unwrap());
    app.wishlist().add(product(2, 200));
    app.flush().await;

    assert!(faulty.writes() >= 2);
    assert_eq!(app.cart().item_count(), 3);
    assert!(app.wishlist().contains(ProductId::new(2)));
}
