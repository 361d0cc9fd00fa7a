//! Customer commands

use super::table::TextTable;
use crate::core::Config;
use crate::db::DbService;
use crate::services::CustomerService;
use clap::Subcommand;
use shared::models::CustomerFilter;

#[derive(Debug, Subcommand)]
pub enum CustomerCommand {
    /// Create a customer with the specified name
    Create { name: String },
    /// List all customers with their IDs
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(cmd: CustomerCommand, db: &DbService, _cfg: &Config) -> anyhow::Result<()> {
    let service = CustomerService::new(db.clone());
    match cmd {
        CustomerCommand::Create { name } => {
            let customer = service.create(&name).await?;
            println!("Created customer '{}' with ID {}", customer.name, customer.id);
        }
        CustomerCommand::List { json } => {
            let customers = service.list(&CustomerFilter::default()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&customers)?);
            } else {
                let mut table = TextTable::new("Customers");
                table.headers(&["ID", "Name"]);
                for c in &customers {
                    table.add_row(vec![c.id.to_string(), c.name.clone()]);
                }
                table.print();
            }
        }
    }
    Ok(())
}
