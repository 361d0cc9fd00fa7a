//! Repository Module
//!
//! CRUD operations for the SQLite tables, as free functions over `&SqlitePool`.
//! Every invariant the ledger guarantees (non-negative stock, one line per
//! order/product pair, all-or-nothing order mutations) is enforced here.

pub mod customer;
pub mod order;
pub mod product;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Duplicate order line: {0}")]
    DuplicateLine(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
