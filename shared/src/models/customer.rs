//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity. Names are unique; customers are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

/// Filters for customer listings. Accepted but currently not applied; the
/// surface is kept so listing call sites don't change when filters land.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerFilter {
    pub name: Option<String>,
}
