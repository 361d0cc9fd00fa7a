//! Product Repository
//!
//! Owns the product rows and the direct (non-order) stock mutations. All
//! stock arithmetic happens in single guarded UPDATEs so the non-negative
//! count invariant cannot be broken between a check and a write.

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductFilter, ProductInput};
use shared::now_millis;
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str =
    "SELECT code, description, brand, price, count_in_carton, count, created_at, updated_at FROM product";

fn required_code(input: &ProductInput) -> RepoResult<&str> {
    input
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| RepoError::Validation("product code is required".into()))
}

fn ensure_non_negative(field: &str, value: Option<i64>) -> RepoResult<()> {
    if let Some(v) = value
        && v < 0
    {
        return Err(RepoError::Validation(format!("{field} must be non-negative, got {v}")));
    }
    Ok(())
}

pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE code = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

pub async fn get(pool: &SqlitePool, code: &str) -> RepoResult<Product> {
    find_by_code(pool, code)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {code} not found")))
}

/// Create a new product. Stock always starts at zero; any count carried by
/// the input (e.g. from an import row) is ignored here.
pub async fn create(pool: &SqlitePool, input: &ProductInput) -> RepoResult<Product> {
    let code = required_code(input)?;
    ensure_non_negative("price", input.price)?;
    ensure_non_negative("count_in_carton", input.count_in_carton)?;
    if find_by_code(pool, code).await?.is_some() {
        return Err(RepoError::Duplicate(format!("Product {code} already exists")));
    }
    let now = now_millis();
    sqlx::query(
        "INSERT INTO product (code, description, brand, price, count_in_carton, count, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)",
    )
    .bind(code)
    .bind(&input.description)
    .bind(&input.brand)
    .bind(input.price)
    .bind(input.count_in_carton)
    .bind(now)
    .execute(pool)
    .await?;
    get(pool, code).await
}

/// Partial update of the descriptive fields. `count` is never touched here;
/// stock moves only through the stock operations and the order repository.
pub async fn update(pool: &SqlitePool, input: &ProductInput) -> RepoResult<Product> {
    let code = required_code(input)?;
    ensure_non_negative("price", input.price)?;
    ensure_non_negative("count_in_carton", input.count_in_carton)?;
    let rows = sqlx::query(
        "UPDATE product SET description = COALESCE(?1, description), brand = COALESCE(?2, brand), price = COALESCE(?3, price), count_in_carton = COALESCE(?4, count_in_carton), updated_at = ?5 WHERE code = ?6",
    )
    .bind(&input.description)
    .bind(&input.brand)
    .bind(input.price)
    .bind(input.count_in_carton)
    .bind(now_millis())
    .bind(code)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {code} not found")));
    }
    get(pool, code).await
}

/// Restock: `count += amount`. Non-positive amounts are rejected so a signed
/// cell in an import cannot sneak past the reduce-side stock guard.
pub async fn add_count(pool: &SqlitePool, code: &str, amount: i64) -> RepoResult<()> {
    if amount <= 0 {
        return Err(RepoError::InvalidAmount(format!(
            "stock addition must be positive, got {amount}"
        )));
    }
    let rows = sqlx::query("UPDATE product SET count = count + ?1, updated_at = ?2 WHERE code = ?3")
        .bind(amount)
        .bind(now_millis())
        .bind(code)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {code} not found")));
    }
    Ok(())
}

/// Remove stock: `count -= amount`, guarded by `count >= amount` in the same
/// UPDATE (compare-and-swap). Zero rows affected means either the product is
/// missing or the stock is short.
pub async fn reduce_count(pool: &SqlitePool, code: &str, amount: i64) -> RepoResult<()> {
    if amount <= 0 {
        return Err(RepoError::InvalidAmount(format!(
            "stock reduction must be positive, got {amount}"
        )));
    }
    let rows = sqlx::query(
        "UPDATE product SET count = count - ?1, updated_at = ?2 WHERE code = ?3 AND count >= ?1",
    )
    .bind(amount)
    .bind(now_millis())
    .bind(code)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        let product = get(pool, code).await?;
        return Err(RepoError::InsufficientStock(format!(
            "Product {code} has {} in stock, cannot reduce by {amount}",
            product.count
        )));
    }
    Ok(())
}

/// Delete a product. Refused while any order line still references the code,
/// otherwise reservation records would dangle.
pub async fn delete(pool: &SqlitePool, code: &str) -> RepoResult<()> {
    get(pool, code).await?;
    let referenced: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_line WHERE product_code = ?")
            .bind(code)
            .fetch_one(pool)
            .await?;
    if referenced > 0 {
        return Err(RepoError::Validation(format!(
            "Product {code} is referenced by {referenced} order line(s)"
        )));
    }
    sqlx::query("DELETE FROM product WHERE code = ?")
        .bind(code)
        .execute(pool)
        .await?;
    Ok(())
}

/// Filtered listing. Present filter fields narrow by AND; results keep store
/// (insertion) order.
pub async fn find_filtered(pool: &SqlitePool, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
    let mut sql = String::from(PRODUCT_SELECT);
    let mut clauses: Vec<&str> = Vec::new();
    if filter.min_price.is_some() {
        clauses.push("price >= ?");
    }
    if filter.max_price.is_some() {
        clauses.push("price <= ?");
    }
    if filter.brand.is_some() {
        clauses.push("brand = ?");
    }
    if filter.min_count.is_some() {
        clauses.push("count >= ?");
    }
    if filter.max_count.is_some() {
        clauses.push("count <= ?");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY rowid");

    // Bind order must match the clause order above.
    let mut query = sqlx::query_as::<_, Product>(&sql);
    if let Some(v) = filter.min_price {
        query = query.bind(v);
    }
    if let Some(v) = filter.max_price {
        query = query.bind(v);
    }
    if let Some(v) = &filter.brand {
        query = query.bind(v);
    }
    if let Some(v) = filter.min_count {
        query = query.bind(v);
    }
    if let Some(v) = filter.max_count {
        query = query.bind(v);
    }
    Ok(query.fetch_all(pool).await?)
}
