//! Order commands

use super::table::TextTable;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{ColumnMap, OrderService};
use chrono::NaiveDate;
use clap::Subcommand;
use shared::format_currency;
use shared::models::{OrderFilter, OrderLineDetail, OrderSummary};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// Create a new order for an existing customer
    Create {
        /// Name of the customer the order belongs to
        customer: String,
        /// Order date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Add a product to an order (first time only; use add-count to grow a line)
    Add {
        order_id: i64,
        product_code: String,
        count: i64,
    },
    /// Add products to an order from a sheet file
    AddBatch {
        order_id: i64,
        file: PathBuf,
        /// 0-based column holding the product code
        #[arg(long, default_value_t = 0)]
        code_col: usize,
        /// 0-based column holding the quantity
        #[arg(long, default_value_t = 1)]
        count_col: usize,
    },
    /// Remove a product line from an order, returning its stock
    Remove { order_id: i64, product_code: String },
    /// Remove product lines listed in a sheet file
    RemoveBatch {
        order_id: i64,
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        code_col: usize,
    },
    /// Increase the quantity of a product already on an order
    AddCount {
        order_id: i64,
        product_code: String,
        count: i64,
    },
    /// Increase quantities from a sheet file
    AddCountBatch {
        order_id: i64,
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        code_col: usize,
        #[arg(long, default_value_t = 1)]
        count_col: usize,
    },
    /// Decrease the quantity of a product on an order (a line hitting zero is removed)
    ReduceCount {
        order_id: i64,
        product_code: String,
        count: i64,
    },
    /// Decrease quantities from a sheet file
    ReduceCountBatch {
        order_id: i64,
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        code_col: usize,
        #[arg(long, default_value_t = 1)]
        count_col: usize,
    },
    /// List orders with their customer, total count and total price
    List {
        /// Filter by exact customer name
        #[arg(long)]
        customer: Option<String>,
        /// Earliest order date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Latest order date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Minimum computed order total
        #[arg(long)]
        min_price: Option<i64>,
        /// Maximum computed order total
        #[arg(long)]
        max_price: Option<i64>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Detailed information about one order
    Info {
        order_id: i64,
        /// Save a sheet instead of printing
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(cmd: OrderCommand, db: &DbService, cfg: &Config) -> anyhow::Result<()> {
    let service = OrderService::new(db.clone(), &cfg.currency);
    match cmd {
        OrderCommand::Create { customer, date } => {
            let order = service.create(&customer, date).await?;
            println!("New order with ID {} was created", order.id);
        }
        OrderCommand::Add {
            order_id,
            product_code,
            count,
        } => {
            let line = service.add_product(order_id, &product_code, count).await?;
            println!("Order {order_id} now holds {} of {product_code}", line.count);
        }
        OrderCommand::AddBatch {
            order_id,
            file,
            code_col,
            count_col,
        } => {
            let map = ColumnMap::stock(code_col, count_col);
            let rows = service.add_product_batch(order_id, &file, &map).await?;
            println!("Added {rows} line(s) to order {order_id} from {}", file.display());
        }
        OrderCommand::Remove {
            order_id,
            product_code,
        } => {
            service.remove_product(order_id, &product_code).await?;
            println!("Removed {product_code} from order {order_id}");
        }
        OrderCommand::RemoveBatch {
            order_id,
            file,
            code_col,
        } => {
            let map = ColumnMap::codes_only(code_col);
            let rows = service.remove_product_batch(order_id, &file, &map).await?;
            println!("Removed {rows} line(s) from order {order_id}");
        }
        OrderCommand::AddCount {
            order_id,
            product_code,
            count,
        } => {
            let line = service.add_count(order_id, &product_code, count).await?;
            println!("Order {order_id} now holds {} of {product_code}", line.count);
        }
        OrderCommand::AddCountBatch {
            order_id,
            file,
            code_col,
            count_col,
        } => {
            let map = ColumnMap::stock(code_col, count_col);
            let rows = service.add_count_batch(order_id, &file, &map).await?;
            println!("Increased {rows} line(s) on order {order_id}");
        }
        OrderCommand::ReduceCount {
            order_id,
            product_code,
            count,
        } => {
            service.reduce_count(order_id, &product_code, count).await?;
            println!("Reduced {product_code} on order {order_id} by {count}");
        }
        OrderCommand::ReduceCountBatch {
            order_id,
            file,
            code_col,
            count_col,
        } => {
            let map = ColumnMap::stock(code_col, count_col);
            let rows = service.reduce_count_batch(order_id, &file, &map).await?;
            println!("Reduced {rows} line(s) on order {order_id}");
        }
        OrderCommand::List {
            customer,
            start_date,
            end_date,
            min_price,
            max_price,
            json,
        } => {
            let filter = OrderFilter {
                customer,
                min_price,
                max_price,
                start_date,
                end_date,
            };
            let orders = service.list(&filter).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&orders)?);
            } else {
                print_order_summaries(&orders, &cfg.currency);
            }
        }
        OrderCommand::Info { order_id, output } => {
            if let Some(path) = output {
                service.save_details(&path, order_id).await?;
                println!("Saved order {order_id} to {}", path.display());
            } else {
                let details = service.details(order_id).await?;
                let (total_count, total_price) = service.totals(order_id).await?;
                print_order_details(order_id, &details, total_count, total_price, &cfg.currency);
            }
        }
    }
    Ok(())
}

fn print_order_summaries(orders: &[OrderSummary], currency: &str) {
    let mut table = TextTable::new("Orders");
    table.headers(&["ID", "Customer", "Date", "Total Count", "Total Price"]);
    for o in orders {
        table.add_row(vec![
            o.id.to_string(),
            o.customer_name.clone(),
            o.date.to_string(),
            o.total_count.to_string(),
            format_currency(o.total_price, currency),
        ]);
    }
    table.print();
}

fn print_order_details(
    order_id: i64,
    details: &[OrderLineDetail],
    total_count: i64,
    total_price: i64,
    currency: &str,
) {
    let mut table = TextTable::new(&format!("Order {order_id}"));
    table.headers(&[
        "Code",
        "Description",
        "Brand",
        "CIC",
        "Price",
        "Line Total",
        "Count",
    ]);
    for d in details {
        table.add_row(vec![
            d.product_code.clone(),
            d.description.clone().unwrap_or_default(),
            d.brand.clone().unwrap_or_default(),
            d.count_in_carton.map(|v| v.to_string()).unwrap_or_default(),
            d.price.map(|v| format_currency(v, currency)).unwrap_or_default(),
            format_currency(d.price.unwrap_or(0) * d.count, currency),
            d.count.to_string(),
        ]);
    }
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
