//! Order Repository
//!
//! Order and order-line lifecycle. This module is the only writer of
//! order_line rows and the only code that moves product stock on behalf of
//! orders. Every line mutation runs in one transaction with its matching
//! stock move, using the same guarded-UPDATE pattern as the product
//! repository, so order operations only shuttle stock between available and
//! reserved.

use super::{RepoError, RepoResult, customer};
use chrono::NaiveDate;
use shared::models::{Order, OrderFilter, OrderLine, OrderLineDetail, OrderSummary};
use shared::{now_millis, snowflake_id};
use sqlx::{Executor, Sqlite, SqlitePool};

const ORDER_SELECT: &str = "SELECT id, customer_id, date, created_at FROM orders";
const LINE_SELECT: &str =
    "SELECT order_id, product_code, count, created_at, updated_at FROM order_line";

async fn fetch_order<'e, E>(ex: E, order_id: i64) -> RepoResult<Option<Order>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(order_id)
        .fetch_optional(ex)
        .await?;
    Ok(order)
}

async fn ensure_order<'e, E>(ex: E, order_id: i64) -> RepoResult<Order>
where
    E: Executor<'e, Database = Sqlite>,
{
    fetch_order(ex, order_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))
}

async fn fetch_line<'e, E>(ex: E, order_id: i64, code: &str) -> RepoResult<Option<OrderLine>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{LINE_SELECT} WHERE order_id = ? AND product_code = ?");
    let line = sqlx::query_as::<_, OrderLine>(&sql)
        .bind(order_id)
        .bind(code)
        .fetch_optional(ex)
        .await?;
    Ok(line)
}

async fn ensure_line<'e, E>(ex: E, order_id: i64, code: &str) -> RepoResult<OrderLine>
where
    E: Executor<'e, Database = Sqlite>,
{
    fetch_line(ex, order_id, code).await?.ok_or_else(|| {
        RepoError::NotFound(format!("Order {order_id} has no line for product {code}"))
    })
}

pub async fn get(pool: &SqlitePool, order_id: i64) -> RepoResult<Order> {
    ensure_order(pool, order_id).await
}

pub async fn find_line(
    pool: &SqlitePool,
    order_id: i64,
    code: &str,
) -> RepoResult<Option<OrderLine>> {
    ensure_order(pool, order_id).await?;
    fetch_line(pool, order_id, code).await
}

/// Create an order for an existing customer, resolved by name. The date
/// defaults to today (UTC) when not supplied.
pub async fn create(
    pool: &SqlitePool,
    customer_name: &str,
    date: Option<NaiveDate>,
) -> RepoResult<Order> {
    let customer = customer::get_by_name(pool, customer_name).await?;
    let id = snowflake_id();
    let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    sqlx::query("INSERT INTO orders (id, customer_id, date, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(customer.id)
        .bind(date)
        .bind(now_millis())
        .execute(pool)
        .await?;
    ensure_order(pool, id).await
}

/// First-time addition of a product to an order: reserves `count` units from
/// stock and creates the line. Growing an existing line is `add_count`'s job;
/// a second add for the same pair is rejected.
pub async fn add_product(
    pool: &SqlitePool,
    order_id: i64,
    code: &str,
    count: i64,
) -> RepoResult<OrderLine> {
    if count <= 0 {
        return Err(RepoError::InvalidAmount(format!(
            "order line count must be positive, got {count}"
        )));
    }
    let mut tx = pool.begin().await?;
    ensure_order(&mut *tx, order_id).await?;
    let stock: Option<i64> = sqlx::query_scalar("SELECT count FROM product WHERE code = ?")
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(stock) = stock else {
        return Err(RepoError::NotFound(format!("Product {code} not found")));
    };
    if fetch_line(&mut *tx, order_id, code).await?.is_some() {
        return Err(RepoError::DuplicateLine(format!(
            "Order {order_id} already has a line for product {code}"
        )));
    }
    let reserved = sqlx::query(
        "UPDATE product SET count = count - ?1, updated_at = ?2 WHERE code = ?3 AND count >= ?1",
    )
    .bind(count)
    .bind(now_millis())
    .bind(code)
    .execute(&mut *tx)
    .await?;
    if reserved.rows_affected() == 0 {
        return Err(RepoError::InsufficientStock(format!(
            "Product {code} has {stock} in stock, order needs {count}"
        )));
    }
    sqlx::query(
        "INSERT INTO order_line (order_id, product_code, count, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(order_id)
    .bind(code)
    .bind(count)
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    ensure_line(pool, order_id, code).await
}

/// Delete a line and return its whole reserved count to stock.
pub async fn remove_product(pool: &SqlitePool, order_id: i64, code: &str) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    ensure_order(&mut *tx, order_id).await?;
    let line = ensure_line(&mut *tx, order_id, code).await?;
    sqlx::query("DELETE FROM order_line WHERE order_id = ? AND product_code = ?")
        .bind(order_id)
        .bind(code)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE product SET count = count + ?1, updated_at = ?2 WHERE code = ?3")
        .bind(line.count)
        .bind(now_millis())
        .bind(code)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

/// Reserve `delta` more units from stock onto an existing line.
pub async fn add_count(
    pool: &SqlitePool,
    order_id: i64,
    code: &str,
    delta: i64,
) -> RepoResult<OrderLine> {
    if delta <= 0 {
        return Err(RepoError::InvalidAmount(format!(
            "order line increase must be positive, got {delta}"
        )));
    }
    let mut tx = pool.begin().await?;
    ensure_order(&mut *tx, order_id).await?;
    ensure_line(&mut *tx, order_id, code).await?;
    let reserved = sqlx::query(
        "UPDATE product SET count = count - ?1, updated_at = ?2 WHERE code = ?3 AND count >= ?1",
    )
    .bind(delta)
    .bind(now_millis())
    .bind(code)
    .execute(&mut *tx)
    .await?;
    if reserved.rows_affected() == 0 {
        let stock: i64 = sqlx::query_scalar("SELECT count FROM product WHERE code = ?")
            .bind(code)
            .fetch_one(&mut *tx)
            .await?;
        return Err(RepoError::InsufficientStock(format!(
            "Product {code} has {stock} in stock, cannot add {delta} to order {order_id}"
        )));
    }
    sqlx::query(
        "UPDATE order_line SET count = count + ?1, updated_at = ?2 WHERE order_id = ?3 AND product_code = ?4",
    )
    .bind(delta)
    .bind(now_millis())
    .bind(order_id)
    .bind(code)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    ensure_line(pool, order_id, code).await
}

/// Give `delta` units back to stock. A reduction that lands exactly on zero
/// deletes the line; reducing past the line's count is rejected.
pub async fn reduce_count(
    pool: &SqlitePool,
    order_id: i64,
    code: &str,
    delta: i64,
) -> RepoResult<()> {
    if delta <= 0 {
        return Err(RepoError::InvalidAmount(format!(
            "order line reduction must be positive, got {delta}"
        )));
    }
    let mut tx = pool.begin().await?;
    ensure_order(&mut *tx, order_id).await?;
    let line = ensure_line(&mut *tx, order_id, code).await?;
    if delta > line.count {
        return Err(RepoError::InvalidAmount(format!(
            "Order {order_id} holds {} of product {code}, cannot reduce by {delta}",
            line.count
        )));
    }
    if delta == line.count {
        sqlx::query("DELETE FROM order_line WHERE order_id = ? AND product_code = ?")
            .bind(order_id)
            .bind(code)
            .execute(&mut *tx)
            .await?;
    } else {
        sqlx::query(
            "UPDATE order_line SET count = count - ?1, updated_at = ?2 WHERE order_id = ?3 AND product_code = ?4",
        )
        .bind(delta)
        .bind(now_millis())
        .bind(order_id)
        .bind(code)
        .execute(&mut *tx)
        .await?;
    }
    sqlx::query("UPDATE product SET count = count + ?1, updated_at = ?2 WHERE code = ?3")
        .bind(delta)
        .bind(now_millis())
        .bind(code)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn lines(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderLine>> {
    ensure_order(pool, order_id).await?;
    let sql = format!("{LINE_SELECT} WHERE order_id = ? ORDER BY rowid");
    let lines = sqlx::query_as::<_, OrderLine>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(lines)
}

/// Lines joined with the current product attributes. `count` in each row is
/// the reserved quantity, the rest reflects the product as it is now.
pub async fn line_details(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderLineDetail>> {
    ensure_order(pool, order_id).await?;
    let details = sqlx::query_as::<_, OrderLineDetail>(
        "SELECT ol.product_code, p.description, p.brand, p.count_in_carton, p.price, ol.count \
         FROM order_line ol JOIN product p ON p.code = ol.product_code \
         WHERE ol.order_id = ? ORDER BY ol.rowid",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(details)
}

pub async fn total_count(pool: &SqlitePool, order_id: i64) -> RepoResult<i64> {
    ensure_order(pool, order_id).await?;
    let total: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(count), 0) FROM order_line WHERE order_id = ?")
            .bind(order_id)
            .fetch_one(pool)
            .await?;
    Ok(total)
}

/// Total price at the current product prices. Recomputed on every call, so
/// later price edits change what past orders report.
pub async fn total_price(pool: &SqlitePool, order_id: i64) -> RepoResult<i64> {
    ensure_order(pool, order_id).await?;
    let total: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(ol.count * COALESCE(p.price, 0)), 0) \
         FROM order_line ol JOIN product p ON p.code = ol.product_code \
         WHERE ol.order_id = ?",
    )
    .bind(order_id)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// One summary row per order. Price bounds compare against the computed
/// total (HAVING), not a stored column; the date range is inclusive.
pub async fn find_filtered(pool: &SqlitePool, filter: &OrderFilter) -> RepoResult<Vec<OrderSummary>> {
    let mut sql = String::from(
        "SELECT o.id, c.name AS customer_name, o.date, \
         COALESCE(SUM(ol.count), 0) AS total_count, \
         COALESCE(SUM(ol.count * COALESCE(p.price, 0)), 0) AS total_price \
         FROM orders o \
         JOIN customer c ON c.id = o.customer_id \
         LEFT JOIN order_line ol ON ol.order_id = o.id \
         LEFT JOIN product p ON p.code = ol.product_code",
    );
    let mut where_clauses: Vec<&str> = Vec::new();
    if filter.customer.is_some() {
        where_clauses.push("c.name = ?");
    }
    if filter.start_date.is_some() {
        where_clauses.push("o.date >= ?");
    }
    if filter.end_date.is_some() {
        where_clauses.push("o.date <= ?");
    }
    if !where_clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clauses.join(" AND "));
    }
    sql.push_str(" GROUP BY o.id, c.name, o.date");
    let mut having_clauses: Vec<&str> = Vec::new();
    if filter.min_price.is_some() {
        having_clauses.push("COALESCE(SUM(ol.count * COALESCE(p.price, 0)), 0) >= ?");
    }
    if filter.max_price.is_some() {
        having_clauses.push("COALESCE(SUM(ol.count * COALESCE(p.price, 0)), 0) <= ?");
    }
    if !having_clauses.is_empty() {
        sql.push_str(" HAVING ");
        sql.push_str(&having_clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY o.id");

    // Bind order: WHERE clauses first, then HAVING.
    let mut query = sqlx::query_as::<_, OrderSummary>(&sql);
    if let Some(v) = &filter.customer {
        query = query.bind(v);
    }
    if let Some(v) = filter.start_date {
        query = query.bind(v);
    }
    if let Some(v) = filter.end_date {
        query = query.bind(v);
    }
    if let Some(v) = filter.min_price {
        query = query.bind(v);
    }
    if let Some(v) = filter.max_price {
        query = query.bind(v);
    }
    Ok(query.fetch_all(pool).await?)
}
