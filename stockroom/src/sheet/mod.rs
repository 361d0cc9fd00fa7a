//! Tabular file source/sink (CSV).
//!
//! The ledger treats sheet files as an opaque row-oriented boundary: the
//! reader yields ordered rows of string cells with the header row stripped,
//! the writer reproduces field values in order behind an optional synthetic
//! row index. Nothing in here knows about products or orders.

pub mod reader;
pub mod writer;

pub use reader::SheetReader;
pub use writer::{Cell, SheetWriter};

use thiserror::Error;

/// Sheet I/O error types
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed sheet: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for sheet operations
pub type SheetResult<T> = Result<T, SheetError>;
