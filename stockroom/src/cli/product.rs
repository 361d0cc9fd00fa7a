//! Product commands

use super::table::TextTable;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::RepoError;
use crate::services::{ColumnMap, ProductService};
use clap::Subcommand;
use shared::format_currency;
use shared::models::{Product, ProductFilter, ProductInput};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Add a new product (stock starts at zero; restock via `availability add`)
    Add {
        code: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        count_in_carton: Option<i64>,
    },
    /// Add products from a sheet file (row 0 is a header and is skipped)
    AddBatch {
        file: PathBuf,
        /// 0-based column holding the product code
        #[arg(long, default_value_t = 0)]
        code_col: usize,
        #[arg(long)]
        description_col: Option<usize>,
        #[arg(long)]
        brand_col: Option<usize>,
        #[arg(long)]
        price_col: Option<usize>,
        #[arg(long)]
        count_in_carton_col: Option<usize>,
    },
    /// Update descriptive fields of an existing product (never its stock)
    Update {
        code: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        count_in_carton: Option<i64>,
    },
    /// Update products from a sheet file
    UpdateBatch {
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        code_col: usize,
        #[arg(long)]
        description_col: Option<usize>,
        #[arg(long)]
        brand_col: Option<usize>,
        #[arg(long)]
        price_col: Option<usize>,
        #[arg(long)]
        count_in_carton_col: Option<usize>,
    },
    /// List products, to stdout or to a sheet file
    List {
        /// Save a pricelist sheet instead of printing
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        min_price: Option<i64>,
        #[arg(long)]
        max_price: Option<i64>,
        #[arg(long)]
        min_count: Option<i64>,
        #[arg(long)]
        max_count: Option<i64>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete the product with the given code
    Remove {
        code: String,
        /// Best-effort cleanup: treat a missing product as success
        #[arg(long)]
        ignore_missing: bool,
    },
}

pub async fn run(cmd: ProductCommand, db: &DbService, cfg: &Config) -> anyhow::Result<()> {
    let service = ProductService::new(db.clone(), &cfg.currency);
    match cmd {
        ProductCommand::Add {
            code,
            description,
            brand,
            price,
            count_in_carton,
        } => {
            let product = service
                .add(&ProductInput {
                    code: Some(code),
                    description,
                    brand,
                    price,
                    count_in_carton,
                    count: None,
                })
                .await?;
            println!("Added product {}", product.code);
        }
        ProductCommand::AddBatch {
            file,
            code_col,
            description_col,
            brand_col,
            price_col,
            count_in_carton_col,
        } => {
            let map = ColumnMap {
                code: Some(code_col),
                description: description_col,
                brand: brand_col,
                price: price_col,
                count_in_carton: count_in_carton_col,
                count: None,
            };
            let rows = service.add_batch(&file, &map).await?;
            println!("Imported {rows} product(s) from {}", file.display());
        }
        ProductCommand::Update {
            code,
            description,
            brand,
            price,
            count_in_carton,
        } => {
            let product = service
                .update(&ProductInput {
                    code: Some(code),
                    description,
                    brand,
                    price,
                    count_in_carton,
                    count: None,
                })
                .await?;
            println!("Updated product {}", product.code);
        }
        ProductCommand::UpdateBatch {
            file,
            code_col,
            description_col,
            brand_col,
            price_col,
            count_in_carton_col,
        } => {
            let map = ColumnMap {
                code: Some(code_col),
                description: description_col,
                brand: brand_col,
                price: price_col,
                count_in_carton: count_in_carton_col,
                count: None,
            };
            let rows = service.update_batch(&file, &map).await?;
            println!("Updated {rows} product(s) from {}", file.display());
        }
        ProductCommand::List {
            output,
            brand,
            min_price,
            max_price,
            min_count,
            max_count,
            json,
        } => {
            let filter = ProductFilter {
                min_price,
                max_price,
                brand,
                min_count,
                max_count,
            };
            let products = service.list(&filter).await?;
            if let Some(path) = output {
                service.save_pricelist(&path, &products)?;
                println!("Saved {} product(s) to {}", products.len(), path.display());
            } else if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else {
                print_pricelist(&products, &cfg.currency);
            }
        }
        ProductCommand::Remove {
            code,
            ignore_missing,
        } => match service.remove(&code).await {
            Ok(()) => println!("Removed product {code}"),
            // Deliberate best-effort path: the operator asked for idempotent
            // cleanup, so a missing product is logged and swallowed. Every
            // other error still aborts.
            Err(RepoError::NotFound(msg)) if ignore_missing => {
                tracing::warn!("{msg} (ignored)");
            }
            Err(err) => return Err(err.into()),
        },
    }
    Ok(())
}

fn print_pricelist(products: &[Product], currency: &str) {
    let mut table = TextTable::new("Products");
    table.headers(&["Code", "Description", "Brand", "CIC", "Price"]);
    for p in products {
        table.add_row(vec![
            p.code.clone(),
            p.description.clone().unwrap_or_default(),
            p.brand.clone().unwrap_or_default(),
            p.count_in_carton.map(|v| v.to_string()).unwrap_or_default(),
            p.price.map(|v| format_currency(v, currency)).unwrap_or_default(),
        ]);
    }
    table.print();
}
