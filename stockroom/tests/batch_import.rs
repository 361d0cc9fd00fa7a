//! Batch applier: row-ordered application, abort-on-first-error, sheet round trips.

mod common;

use common::{seed_product, setup};
use shared::models::ProductFilter;
use stockroom::db::repository::{customer, order, product};
use stockroom::services::{ColumnMap, CustomerService, OrderService, ProductService};
use stockroom::{DbService, RepoError};
use std::path::PathBuf;

fn write_sheet(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn products(db: &DbService) -> ProductService {
    ProductService::new(db.clone(), "IRR")
}

fn orders(db: &DbService) -> OrderService {
    OrderService::new(db.clone(), "IRR")
}

#[tokio::test]
async fn add_batch_applies_one_create_per_data_row_in_file_order() {
    let (dir, db) = setup().await;
    let sheet = write_sheet(
        &dir,
        "products.csv",
        "Code,CIC,Description,Price\nP003,6,Third,300\nP001,12,First,100\nP002,24,Second,200\n",
    );
    let map = ColumnMap {
        code: Some(0),
        count_in_carton: Some(1),
        description: Some(2),
        price: Some(3),
        ..ColumnMap::default()
    };
    let applied = products(&db).add_batch(&sheet, &map).await.unwrap();
    assert_eq!(applied, 3);

    let all = product::find_filtered(&db.pool, &ProductFilter::default())
        .await
        .unwrap();
    let codes: Vec<&str> = all.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, ["P003", "P001", "P002"]); // file order, not code order
    assert_eq!(all[0].price, Some(300));
    assert_eq!(all[0].description.as_deref(), Some("Third"));
    assert_eq!(all[0].count, 0);
}

#[tokio::test]
async fn unmapped_columns_leave_fields_empty() {
    let (dir, db) = setup().await;
    let sheet = write_sheet(&dir, "codes.csv", "Code,Price\nP001,999\n");
    let map = ColumnMap::codes_only(0);
    products(&db).add_batch(&sheet, &map).await.unwrap();

    let created = product::get(&db.pool, "P001").await.unwrap();
    assert_eq!(created.price, None);
    assert_eq!(created.description, None);
}

#[tokio::test]
async fn restock_batch_moves_stock_per_row() {
    let (dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 100, 0).await;
    seed_product(&db, "P002", "BrandA", 100, 0).await;
    let sheet = write_sheet(&dir, "restock.csv", "Code,Amount\nP001,10\nP002,4\nP001,5\n");
    let applied = products(&db)
        .add_count_batch(&sheet, &ColumnMap::stock(0, 1))
        .await
        .unwrap();
    assert_eq!(applied, 3);
    assert_eq!(common::stock_of(&db, "P001").await, 15);
    assert_eq!(common::stock_of(&db, "P002").await, 4);
}

#[tokio::test]
async fn a_failing_row_aborts_the_batch_and_keeps_earlier_rows() {
    let (dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 100, 0).await;
    // Row 3 refers to a product that doesn't exist; row 4 must never apply.
    let sheet = write_sheet(&dir, "restock.csv", "Code,Amount\nP001,10\nNOPE,1\nP001,5\n");
    let err = products(&db)
        .add_count_batch(&sheet, &ColumnMap::stock(0, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RepoError>(),
        Some(RepoError::NotFound(_))
    ));
    assert_eq!(common::stock_of(&db, "P001").await, 10);
}

#[tokio::test]
async fn a_malformed_cell_names_its_row() {
    let (dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 100, 0).await;
    let sheet = write_sheet(&dir, "restock.csv", "Code,Amount\nP001,10\nP001,lots\n");
    let err = products(&db)
        .add_count_batch(&sheet, &ColumnMap::stock(0, 1))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("row 3"));
    // The valid first row was applied before the abort.
    assert_eq!(common::stock_of(&db, "P001").await, 10);
}

#[tokio::test]
async fn update_batch_does_not_clobber_unmapped_fields() {
    let (dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 100, 0).await;
    let sheet = write_sheet(&dir, "prices.csv", "Code,Price\nP001,250\n");
    let map = ColumnMap {
        code: Some(0),
        price: Some(1),
        ..ColumnMap::default()
    };
    products(&db).update_batch(&sheet, &map).await.unwrap();

    let updated = product::get(&db.pool, "P001").await.unwrap();
    assert_eq!(updated.price, Some(250));
    assert_eq!(updated.brand.as_deref(), Some("BrandA"));
}

#[tokio::test]
async fn order_add_batch_reserves_stock_row_by_row() {
    let (dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 500, 10).await;
    seed_product(&db, "P002", "BrandB", 200, 10).await;
    customer::create(&db.pool, "Acme").await.unwrap();
    let placed = order::create(&db.pool, "Acme", None).await.unwrap();

    let sheet = write_sheet(&dir, "lines.csv", "Code,Count\nP001,4\nP002,6\n");
    let applied = orders(&db)
        .add_product_batch(placed.id, &sheet, &ColumnMap::stock(0, 1))
        .await
        .unwrap();
    assert_eq!(applied, 2);
    assert_eq!(common::stock_of(&db, "P001").await, 6);
    assert_eq!(common::stock_of(&db, "P002").await, 4);
    assert_eq!(order::total_count(&db.pool, placed.id).await.unwrap(), 10);
}

#[tokio::test]
async fn order_batch_aborts_on_insufficient_stock_without_partial_row_effects() {
    let (dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 500, 10).await;
    seed_product(&db, "P002", "BrandB", 200, 3).await;
    seed_product(&db, "P003", "BrandC", 100, 10).await;
    customer::create(&db.pool, "Acme").await.unwrap();
    let placed = order::create(&db.pool, "Acme", None).await.unwrap();

    let sheet = write_sheet(&dir, "lines.csv", "Code,Count\nP001,4\nP002,6\nP003,1\n");
    let err = orders(&db)
        .add_product_batch(placed.id, &sheet, &ColumnMap::stock(0, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RepoError>(),
        Some(RepoError::InsufficientStock(_))
    ));
    // Row 2 applied, row 3 failed whole, row 4 never ran.
    assert_eq!(common::stock_of(&db, "P001").await, 6);
    assert_eq!(common::stock_of(&db, "P002").await, 3);
    assert_eq!(common::stock_of(&db, "P003").await, 10);
    assert!(order::find_line(&db.pool, placed.id, "P003").await.unwrap().is_none());
}

#[tokio::test]
async fn availability_export_reimports_as_a_restock_sheet() {
    let (dir, db) = setup().await;
    seed_product(&db, "P001", "BrandA", 500, 10).await;
    seed_product(&db, "P002", "BrandB", 200, 4).await;

    let service = products(&db);
    let listed = service.list(&ProductFilter::default()).await.unwrap();
    let sheet = dir.path().join("availability.csv");
    service.save_availability(&sheet, &listed).unwrap();

    // The export carries a row index in column 0, codes in column 1 and
    // counts in column 7; replaying it doubles the stock.
    let map = ColumnMap::stock(1, 7);
    let applied = service.add_count_batch(&sheet, &map).await.unwrap();
    assert_eq!(applied, 2);
    assert_eq!(common::stock_of(&db, "P001").await, 20);
    assert_eq!(common::stock_of(&db, "P002").await, 8);
}

#[tokio::test]
async fn customer_listing_ignores_filters_for_now() {
    let (_dir, db) = setup().await;
    customer::create(&db.pool, "Acme").await.unwrap();
    customer::create(&db.pool, "Globex").await.unwrap();

    let service = CustomerService::new(db.clone());
    let filter = shared::models::CustomerFilter {
        name: Some("Acme".to_string()),
    };
    let all = service.list(&filter).await.unwrap();
    assert_eq!(all.len(), 2);
}
