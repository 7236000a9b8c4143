//! Integration tests for browsing the catalog through `AppState`.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use tote_core::{ProductFilter, ProductId};
use tote_integration_tests::{FakeCatalog, sample_products};
use tote_storefront::catalog::CatalogError;
use tote_storefront::error::AppError;
use tote_storefront::state::AppState;
use tote_storefront::storage::MemoryStore;

fn app(catalog: Arc<FakeCatalog>) -> AppState {
    AppState::from_parts(catalog, Arc::new(MemoryStore::new()))
}

fn ids(products: &[tote_core::Product]) -> Vec<i64> {
    products.iter().map(|p| p.id.as_i64()).collect()
}

#[tokio::test]
async fn test_empty_filter_returns_everything_in_order() {
    let app = app(Arc::new(FakeCatalog::new(sample_products())));

    let found = app.browse(&ProductFilter::new()).await.unwrap();

    assert_eq!(ids(&found), vec![1, 2, 5, 9, 10, 16]);
}

#[tokio::test]
async fn test_category_is_exact_match() {
    let app = app(Arc::new(FakeCatalog::new(sample_products())));

    let found = app
        .browse(&ProductFilter::new().category("men's clothing"))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![1, 2]);

    let found = app
        .browse(&ProductFilter::new().category("clothing"))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_query_is_case_insensitive() {
    let app = app(Arc::new(FakeCatalog::new(sample_products())));

    let found = app
        .browse(&ProductFilter::new().query("  SSD "))
        .await
        .unwrap();

    assert_eq!(ids(&found), vec![10]);
}

#[tokio::test]
async fn test_query_matches_description() {
    let app = app(Arc::new(FakeCatalog::new(sample_products())));

    let found = app
        .browse(&ProductFilter::new().query("jewelery department"))
        .await
        .unwrap();

    assert_eq!(ids(&found), vec![5]);
}

#[tokio::test]
async fn test_category_and_query_combine() {
    let app = app(Arc::new(FakeCatalog::new(sample_products())));

    let found = app
        .browse(&ProductFilter::new().category("electronics").query("drive"))
        .await
        .unwrap();

    assert_eq!(ids(&found), vec![9]);
}

#[tokio::test]
async fn test_categories_are_distinct() {
    let app = app(Arc::new(FakeCatalog::new(sample_products())));

    let categories = app.categories().await.unwrap();

    assert_eq!(
        categories,
        vec!["men's clothing", "jewelery", "electronics", "women's clothing"]
    );
}

#[tokio::test]
async fn test_unknown_product_is_not_reported() {
    let app = app(Arc::new(FakeCatalog::new(sample_products())));

    let err = app.product(ProductId::new(404)).await.unwrap_err();

    assert!(matches!(err, AppError::Catalog(CatalogError::NotFound(_))));
    assert!(!err.is_reportable());
}

#[tokio::test]
async fn test_offline_catalog_shows_retry_message() {
    let catalog = Arc::new(FakeCatalog::new(sample_products()));
    let app = app(catalog.clone());
    catalog.go_offline();

    let err = app.browse(&ProductFilter::new()).await.unwrap_err();

    assert_eq!(
        err.user_message(),
        "Failed to load products. Please try again later."
    );
    assert!(err.is_reportable());
}

#[tokio::test]
async fn test_catalog_failure_leaves_collections_alone() {
    let catalog = Arc::new(FakeCatalog::new(sample_products()));
    let app = app(catalog.clone());
    app.hydrate().await;
    let backpack = app.product(ProductId::new(1)).await.unwrap();
    app.cart().add_one(backpack);

    catalog.go_offline();
    assert!(app.product(ProductId::new(2)).await.is_err());

    assert_eq!(app.cart().len(), 1);
    assert!(app.is_ready());
}
