//! Shared data models and utilities for the Stockroom warehouse ledger.
//!
//! DB row types derive `sqlx::FromRow` behind the `db` feature so the CLI
//! crate can map queries directly while the models stay usable without sqlx.

pub mod models;
pub mod util;

pub use util::{format_currency, now_millis, snowflake_id};
