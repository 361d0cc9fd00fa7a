//! CLI Module
//!
//! clap command tree. Every subcommand maps 1:1 onto a service operation;
//! failures bubble to `main`, which prints the message and exits non-zero.

pub mod availability;
pub mod customer;
pub mod order;
pub mod product;
pub mod table;

use crate::core::Config;
use crate::db::DbService;
use clap::{Parser, Subcommand};

/// Warehouse ledger: products, stock counts, customers and orders.
#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage products and get product information
    #[command(subcommand)]
    Product(product::ProductCommand),
    /// Manage and get availability (stock counts) of products
    #[command(subcommand)]
    Availability(availability::AvailabilityCommand),
    /// Manage and get information about customers
    #[command(subcommand)]
    Customer(customer::CustomerCommand),
    /// Manage and get order information
    #[command(subcommand)]
    Order(order::OrderCommand),
}

pub async fn run(cli: Cli, db: &DbService, cfg: &Config) -> anyhow::Result<()> {
    match cli.command {
        Command::Product(cmd) => product::run(cmd, db, cfg).await,
        Command::Availability(cmd) => availability::run(cmd, db, cfg).await,
        Command::Customer(cmd) => customer::run(cmd, db, cfg).await,
        Command::Order(cmd) => order::run(cmd, db, cfg).await,
    }
}
