//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity. `count` is the on-hand stock and is kept non-negative by
/// the repository layer (and a CHECK constraint in the schema).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub code: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    /// Unit price in whole currency units.
    pub price: Option<i64>,
    /// Units per carton, informational only.
    pub count_in_carton: Option<i64>,
    /// On-hand stock, excluding anything reserved by order lines.
    pub count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Field bundle consumed by the add/update/stock paths and produced by the
/// batch row projection. Every field is optional; a column role that is not
/// mapped in an import simply stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub code: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Option<i64>,
    pub count_in_carton: Option<i64>,
    pub count: Option<i64>,
}

/// Filters for product listings. Absent fields impose no constraint; present
/// fields narrow by AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub brand: Option<String>,
    pub min_count: Option<i64>,
    pub max_count: Option<i64>,
}
