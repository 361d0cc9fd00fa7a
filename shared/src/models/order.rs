//! Order Models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Order entity. The customer reference is resolved by name at creation time
/// and required; `date` defaults to the creation day when not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub date: NaiveDate,
    pub created_at: i64,
}

/// Order line: at most one per `(order, product)` pair. `count` is the
/// quantity reserved from the product's stock while the line exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub order_id: i64,
    pub product_code: String,
    pub count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A line joined with the current product attributes, for order detail views.
/// `count` is the line's reserved quantity, not the product stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLineDetail {
    pub product_code: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub count_in_carton: Option<i64>,
    pub price: Option<i64>,
    pub count: i64,
}

/// One summary row per order, with totals computed at query time from the
/// current product prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub customer_name: String,
    pub date: NaiveDate,
    pub total_count: i64,
    pub total_price: i64,
}

/// Row shape for order-line imports: a product code and a quantity, either of
/// which may be absent when the corresponding column role is unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub product_code: Option<String>,
    pub count: Option<i64>,
}

/// Filters for order listings. `min_price`/`max_price` compare against the
/// computed order total, not a stored field; the date range is inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    pub customer: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
