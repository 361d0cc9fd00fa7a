//! Order Service
//!
//! Coordinates the order engine: line mutations (which reserve and release
//! product stock), sheet-driven batch variants, summaries and detail export.

use super::batch::{self, ColumnMap};
use crate::db::DbService;
use crate::db::repository::{RepoResult, customer, order};
use crate::sheet::{Cell, SheetReader, SheetWriter};
use chrono::NaiveDate;
use shared::models::{Order, OrderFilter, OrderLine, OrderLineDetail, OrderSummary};
use std::path::Path;

pub struct OrderService {
    db: DbService,
    currency: String,
}

impl OrderService {
    pub fn new(db: DbService, currency: &str) -> Self {
        Self {
            db,
            currency: currency.to_string(),
        }
    }

    pub async fn create(&self, customer_name: &str, date: Option<NaiveDate>) -> RepoResult<Order> {
        order::create(&self.db.pool, customer_name, date).await
    }

    pub async fn add_product(&self, order_id: i64, code: &str, count: i64) -> RepoResult<OrderLine> {
        order::add_product(&self.db.pool, order_id, code, count).await
    }

    pub async fn remove_product(&self, order_id: i64, code: &str) -> RepoResult<()> {
        order::remove_product(&self.db.pool, order_id, code).await
    }

    pub async fn add_count(&self, order_id: i64, code: &str, delta: i64) -> RepoResult<OrderLine> {
        order::add_count(&self.db.pool, order_id, code, delta).await
    }

    pub async fn reduce_count(&self, order_id: i64, code: &str, delta: i64) -> RepoResult<()> {
        order::reduce_count(&self.db.pool, order_id, code, delta).await
    }

    pub async fn details(&self, order_id: i64) -> RepoResult<Vec<OrderLineDetail>> {
        order::line_details(&self.db.pool, order_id).await
    }

    /// (total units, total price) for one order, at current prices.
    pub async fn totals(&self, order_id: i64) -> RepoResult<(i64, i64)> {
        let count = order::total_count(&self.db.pool, order_id).await?;
        let price = order::total_price(&self.db.pool, order_id).await?;
        Ok((count, price))
    }

    pub async fn list(&self, filter: &OrderFilter) -> RepoResult<Vec<OrderSummary>> {
        order::find_filtered(&self.db.pool, filter).await
    }

    // ==================== Batch variants ====================

    pub async fn add_product_batch(
        &self,
        order_id: i64,
        path: &Path,
        map: &ColumnMap,
    ) -> anyhow::Result<usize> {
        let reader = SheetReader::open(path)?;
        let mut applied = 0;
        for (i, row) in reader.data_rows().iter().enumerate() {
            let input = batch::project_order_line(row, map, i + 2)?;
            let code = batch::required_text(input.product_code, "code", i + 2)?;
            let count = batch::required_int(input.count, "count", i + 2)?;
            order::add_product(&self.db.pool, order_id, &code, count).await?;
            applied += 1;
        }
        tracing::info!(order_id, rows = applied, "added order lines from {}", path.display());
        Ok(applied)
    }

    pub async fn remove_product_batch(
        &self,
        order_id: i64,
        path: &Path,
        map: &ColumnMap,
    ) -> anyhow::Result<usize> {
        let reader = SheetReader::open(path)?;
        let mut applied = 0;
        for (i, row) in reader.data_rows().iter().enumerate() {
            let input = batch::project_order_line(row, map, i + 2)?;
            let code = batch::required_text(input.product_code, "code", i + 2)?;
            order::remove_product(&self.db.pool, order_id, &code).await?;
            applied += 1;
        }
        tracing::info!(order_id, rows = applied, "removed order lines from {}", path.display());
        Ok(applied)
    }

    pub async fn add_count_batch(
        &self,
        order_id: i64,
        path: &Path,
        map: &ColumnMap,
    ) -> anyhow::Result<usize> {
        let reader = SheetReader::open(path)?;
        let mut applied = 0;
        for (i, row) in reader.data_rows().iter().enumerate() {
            let input = batch::project_order_line(row, map, i + 2)?;
            let code = batch::required_text(input.product_code, "code", i + 2)?;
            let delta = batch::required_int(input.count, "count", i + 2)?;
            order::add_count(&self.db.pool, order_id, &code, delta).await?;
            applied += 1;
        }
        tracing::info!(order_id, rows = applied, "increased order lines from {}", path.display());
        Ok(applied)
    }

    pub async fn reduce_count_batch(
        &self,
        order_id: i64,
        path: &Path,
        map: &ColumnMap,
    ) -> anyhow::Result<usize> {
        let reader = SheetReader::open(path)?;
        let mut applied = 0;
        for (i, row) in reader.data_rows().iter().enumerate() {
            let input = batch::project_order_line(row, map, i + 2)?;
            let code = batch::required_text(input.product_code, "code", i + 2)?;
            let delta = batch::required_int(input.count, "count", i + 2)?;
            order::reduce_count(&self.db.pool, order_id, &code, delta).await?;
            applied += 1;
        }
        tracing::info!(order_id, rows = applied, "reduced order lines from {}", path.display());
        Ok(applied)
    }

    // ==================== Sheet export ====================

    /// Order detail sheet: one row per line, banner carrying the order id,
    /// subheaders carrying customer and date.
    pub async fn save_details(&self, path: &Path, order_id: i64) -> anyhow::Result<()> {
        let order = order::get(&self.db.pool, order_id).await?;
        let who = customer::get_by_id(&self.db.pool, order.customer_id).await?;
        let details = order::line_details(&self.db.pool, order_id).await?;

        let mut writer = SheetWriter::new(&self.currency);
        writer.add_headers(&[
            "Code",
            "Description",
            "Brand",
            "CIC",
            "Price",
            "Line Total",
            "Count",
        ]);
        writer.add_data(
            details
                .iter()
                .map(|d| {
                    vec![
                        Cell::from(d.product_code.as_str()),
                        Cell::from(d.description.clone()),
                        Cell::from(d.brand.clone()),
                        Cell::from(d.count_in_carton),
                        Cell::from(d.price),
                        Cell::from(d.price.unwrap_or(0) * d.count),
                        Cell::from(d.count),
                    ]
                })
                .collect(),
        );
        writer.add_row_index_column();
        writer.add_title(&format!("Order {order_id}"));
        writer.add_subheaders(&who.name, &order.date.to_string());
        writer.set_column_currency_format(4);
        writer.set_column_currency_format(5);
        writer.save(path)?;
        Ok(())
    }
}
