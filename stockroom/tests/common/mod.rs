//! Shared test helpers: a temp-file SQLite database and seed data.

use shared::models::ProductInput;
use stockroom::DbService;
use stockroom::db::repository::product;

pub async fn setup() -> (tempfile::TempDir, DbService) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().unwrap()).await.unwrap();
    (dir, db)
}

pub fn input(code: &str) -> ProductInput {
    ProductInput {
        code: Some(code.to_string()),
        ..ProductInput::default()
    }
}

pub fn full_input(code: &str, brand: &str, price: i64) -> ProductInput {
    ProductInput {
        code: Some(code.to_string()),
        description: Some(format!("{code} description")),
        brand: Some(brand.to_string()),
        price: Some(price),
        count_in_carton: Some(12),
        count: None,
    }
}

/// Create a product and put `stock` units on hand.
pub async fn seed_product(db: &DbService, code: &str, brand: &str, price: i64, stock: i64) {
    product::create(&db.pool, &full_input(code, brand, price))
        .await
        .unwrap();
    if stock > 0 {
        product::add_count(&db.pool, code, stock).await.unwrap();
    }
}

pub async fn stock_of(db: &DbService, code: &str) -> i64 {
    product::get(&db.pool, code).await.unwrap().count
}
