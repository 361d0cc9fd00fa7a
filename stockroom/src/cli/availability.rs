//! Availability (stock count) commands

use super::table::TextTable;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{ColumnMap, ProductService};
use clap::Subcommand;
use shared::format_currency;
use shared::models::{Product, ProductFilter};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum AvailabilityCommand {
    /// Add AMOUNT to the specified product's stock
    Add { code: String, amount: i64 },
    /// Restock products from a sheet file
    AddBatch {
        file: PathBuf,
        /// 0-based column holding the product code
        #[arg(long, default_value_t = 0)]
        code_col: usize,
        /// 0-based column holding the amount
        #[arg(long, default_value_t = 1)]
        count_col: usize,
    },
    /// Reduce AMOUNT from the specified product's stock
    Reduce { code: String, amount: i64 },
    /// Reduce product stock from a sheet file
    ReduceBatch {
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        code_col: usize,
        #[arg(long, default_value_t = 1)]
        count_col: usize,
    },
    /// List availability with totals, to stdout or to a sheet file
    List {
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
    /// Availability of specific product codes (comma separated)
    Info { codes: String },
}

pub async fn run(cmd: AvailabilityCommand, db: &DbService, cfg: &Config) -> anyhow::Result<()> {
    let service = ProductService::new(db.clone(), &cfg.currency);
    match cmd {
        AvailabilityCommand::Add { code, amount } => {
            service.add_count(&code, amount).await?;
            println!("Added {amount} to product {code}");
        }
        AvailabilityCommand::AddBatch {
            file,
            code_col,
            count_col,
        } => {
            let map = ColumnMap::stock(code_col, count_col);
            let rows = service.add_count_batch(&file, &map).await?;
            println!("Restocked {rows} product(s) from {}", file.display());
        }
        AvailabilityCommand::Reduce { code, amount } => {
            service.reduce_count(&code, amount).await?;
            println!("Reduced {amount} from product {code}");
        }
        AvailabilityCommand::ReduceBatch {
            file,
            code_col,
            count_col,
        } => {
            let map = ColumnMap::stock(code_col, count_col);
            let rows = service.reduce_count_batch(&file, &map).await?;
            println!("Reduced stock of {rows} product(s) from {}", file.display());
        }
        AvailabilityCommand::List {
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
                service.save_availability(&path, &products)?;
                println!("Saved {} product(s) to {}", products.len(), path.display());
            } else if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else {
                print_availability(&products, &cfg.currency);
            }
        }
        AvailabilityCommand::Info { codes } => {
            let codes: Vec<&str> = codes.split(',').collect();
            let products = service.by_codes(&codes).await?;
            print_availability(&products, &cfg.currency);
        }
    }
    Ok(())
}

fn print_availability(products: &[Product], currency: &str) {
    let mut table = TextTable::new("Availability");
    table.headers(&[
        "Code",
        "Description",
        "Brand",
        "CIC",
        "Price",
        "Total Price",
        "Count",
    ]);
    for p in products {
        table.add_row(vec![
            p.code.clone(),
            p.description.clone().unwrap_or_default(),
            p.brand.clone().unwrap_or_default(),
            p.count_in_carton.map(|v| v.to_string()).unwrap_or_default(),
            p.price.map(|v| format_currency(v, currency)).unwrap_or_default(),
            format_currency(p.price.unwrap_or(0) * p.count, currency),
            p.count.to_string(),
        ]);
    }
    let (total_count, total_price) = ProductService::availability_totals(products);
    table.add_section();
    table.add_row(vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format_currency(total_price, currency),
        total_count.to_string(),
    ]);
    table.print();
}
