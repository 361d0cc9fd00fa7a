//! Stockroom: single-operator warehouse ledger.
//!
//! Products carry a price and an on-hand count; orders reserve product stock
//! line by line and can never drive a count negative. Each CLI invocation
//! performs one logical operation (or one sequential batch of rows) against
//! the SQLite store and exits.
//!
//! # Module structure
//!
//! ```text
//! stockroom/src/
//! ├── core/          # config, logging
//! ├── db/            # connection pool, migrations, repositories
//! ├── services/      # product ledger, order engine, batch applier
//! ├── sheet/         # tabular file reader/writer (CSV)
//! └── cli/           # clap command tree, text tables
//! ```

pub mod cli;
pub mod core;
pub mod db;
pub mod services;
pub mod sheet;

// Re-export public types
pub use crate::core::Config;
pub use db::DbService;
pub use db::repository::{RepoError, RepoResult};
pub use services::{ColumnMap, CustomerService, OrderService, ProductService};
