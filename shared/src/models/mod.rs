//! Data models
//!
//! Row types for the SQLite store plus the input/filter shapes used by the
//! service layer. DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Generated IDs are `i64` (SQLite INTEGER PRIMARY KEY); product codes are TEXT.

pub mod customer;
pub mod order;
pub mod product;

// Re-exports
pub use customer::*;
pub use order::*;
pub use product::*;
