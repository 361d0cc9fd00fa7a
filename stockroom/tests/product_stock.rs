//! Product ledger: stock invariants, partial updates, filtered listings.

mod common;

use common::{full_input, input, seed_product, setup, stock_of};
use shared::models::{ProductFilter, ProductInput};
use stockroom::RepoError;
use stockroom::db::repository::{customer, order, product};

#[tokio::test]
async fn create_starts_at_zero_even_when_input_carries_a_count() {
    let (_dir, db) = setup().await;
    let mut with_count = full_input("P001", "BrandA", 500);
    with_count.count = Some(99);
    let created = product::create(&db.pool, &with_count).await.unwrap();
    assert_eq!(created.count, 0);
}

#[tokio::test]
async fn create_rejects_duplicate_codes() {
    let (_dir, db) = setup().await;
    product::create(&db.pool, &input("P001")).await.unwrap();
    let err = product::create(&db.pool, &input("P001")).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn create_requires_a_code() {
    let (_dir, db) = setup().await;
    let err = product::create(&db.pool, &ProductInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn add_count_accumulates() {
    let (_dir, db) = setup().await;
    product::create(&db.pool, &input("P001")).await.unwrap();
    product::add_count(&db.pool, "P001", 10).await.unwrap();
    product::add_count(&db.pool, "P001", 5).await.unwrap();
    assert_eq!(stock_of(&db, "P001").await, 15);
}

#[tokio::test]
async fn add_count_unknown_code_is_not_found() {
    let (_dir, db) = setup().await;
    let err = product::add_count(&db.pool, "NOPE", 1).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn add_count_rejects_non_positive_amounts() {
    let (_dir, db) = setup().await;
    product::create(&db.pool, &input("P001")).await.unwrap();
    for amount in [0, -5] {
        let err = product::add_count(&db.pool, "P001", amount).await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidAmount(_)));
    }
    assert_eq!(stock_of(&db, "P001").await, 0);
}

#[tokio::test]
async fn add_then_reduce_restores_the_original_count() {
    let (_dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 500, 7).await;
    product::add_count(&db.pool, "P001", 13).await.unwrap();
    product::reduce_count(&db.pool, "P001", 13).await.unwrap();
    assert_eq!(stock_of(&db, "P001").await, 7);
}

#[tokio::test]
async fn reduce_count_past_stock_fails_and_leaves_stock_untouched() {
    let (_dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 500, 5).await;
    let err = product::reduce_count(&db.pool, "P001", 6).await.unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));
    assert_eq!(stock_of(&db, "P001").await, 5);
}

#[tokio::test]
async fn reduce_count_unknown_code_is_not_found() {
    let (_dir, db) = setup().await;
    let err = product::reduce_count(&db.pool, "NOPE", 1).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn update_applies_only_supplied_fields_and_never_count() {
    let (_dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 500, 3).await;
    let patch = ProductInput {
        code: Some("P001".to_string()),
        price: Some(750),
        count: Some(42), // must be ignored
        ..ProductInput::default()
    };
    let updated = product::update(&db.pool, &patch).await.unwrap();
    assert_eq!(updated.price, Some(750));
    assert_eq!(updated.brand.as_deref(), Some("BrandA"));
    assert_eq!(updated.description.as_deref(), Some("P001 description"));
    assert_eq!(updated.count, 3);
}

#[tokio::test]
async fn update_unknown_code_is_not_found() {
    let (_dir, db) = setup().await;
    let err = product::update(&db.pool, &input("NOPE")).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn update_rejects_negative_price() {
    let (_dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 500, 0).await;
    let patch = ProductInput {
        code: Some("P001".to_string()),
        price: Some(-1),
        ..ProductInput::default()
    };
    let err = product::update(&db.pool, &patch).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn delete_removes_an_unreferenced_product() {
    let (_dir, db) = setup().await;
    product::create(&db.pool, &input("P001")).await.unwrap();
    product::delete(&db.pool, "P001").await.unwrap();
    assert!(product::find_by_code(&db.pool, "P001").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_unknown_code_is_not_found() {
    let (_dir, db) = setup().await;
    let err = product::delete(&db.pool, "NOPE").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn delete_is_refused_while_an_order_line_references_the_product() {
    let (_dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 500, 10).await;
    customer::create(&db.pool, "Acme").await.unwrap();
    let placed = order::create(&db.pool, "Acme", None).await.unwrap();
    order::add_product(&db.pool, placed.id, "P001", 4).await.unwrap();

    let err = product::delete(&db.pool, "P001").await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(product::find_by_code(&db.pool, "P001").await.unwrap().is_some());

    // Once the line is gone the delete goes through.
    order::remove_product(&db.pool, placed.id, "P001").await.unwrap();
    product::delete(&db.pool, "P001").await.unwrap();
}

#[tokio::test]
async fn filters_narrow_by_and_and_keep_store_order() {
    let (_dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 1500, 0).await;
    seed_product(&db, "P002", "BrandB", 2000, 0).await;
    seed_product(&db, "P003", "BrandA", 500, 0).await;
    seed_product(&db, "P004", "BrandA", 3000, 0).await;

    let filter = ProductFilter {
        min_price: Some(1000),
        brand: Some("BrandA".to_string()),
        ..ProductFilter::default()
    };
    let hits = product::find_filtered(&db.pool, &filter).await.unwrap();
    let codes: Vec<&str> = hits.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, ["P001", "P004"]);
}

#[tokio::test]
async fn absent_filters_return_everything_in_insertion_order() {
    let (_dir, db) = setup().await;
    seed_product(&db, "P002", "BrandB", 100, 0).await;
    seed_product(&db, "P001", "BrandA", 200, 0).await;
    let all = product::find_filtered(&db.pool, &ProductFilter::default())
        .await
        .unwrap();
    let codes: Vec<&str> = all.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, ["P002", "P001"]);
}

#[tokio::test]
async fn count_filters_bound_the_listing() {
    let (_dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 100, 2).await;
    seed_product(&db, "P002", "BrandA", 100, 8).await;
    seed_product(&db, "P003", "BrandA", 100, 20).await;

    let filter = ProductFilter {
        min_count: Some(5),
        max_count: Some(10),
        ..ProductFilter::default()
    };
    let hits = product::find_filtered(&db.pool, &filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code, "P002");
}
