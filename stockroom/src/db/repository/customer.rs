//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerFilter};
use shared::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str = "SELECT id, name, created_at FROM customer";

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE name = ? LIMIT 1");
    let customer = sqlx::query_as::<_, Customer>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(customer)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let customer = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(customer)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Customer> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

pub async fn get_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Customer> {
    find_by_name(pool, name)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer '{name}' not found")))
}

pub async fn create(pool: &SqlitePool, name: &str) -> RepoResult<Customer> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepoError::Validation("customer name is required".into()));
    }
    if find_by_name(pool, name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "A customer named '{name}' already exists"
        )));
    }
    let id = snowflake_id();
    sqlx::query("INSERT INTO customer (id, name, created_at) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(name)
        .bind(now_millis())
        .execute(pool)
        .await?;
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let customer = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    customer.ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

/// List customers. The filter is accepted but not applied yet; the listing is
/// the full table in insertion order.
pub async fn find_filtered(
    pool: &SqlitePool,
    _filter: &CustomerFilter,
) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY rowid");
    let customers = sqlx::query_as::<_, Customer>(&sql).fetch_all(pool).await?;
    Ok(customers)
}
