//! Product Service
//!
//! Coordinates the product ledger: single-row operations, sheet imports via
//! the batch applier, and pricelist/availability reporting.

use super::batch::{self, ColumnMap};
use crate::db::DbService;
use crate::db::repository::{RepoResult, product};
use crate::sheet::{Cell, SheetReader, SheetWriter};
use shared::models::{Product, ProductFilter, ProductInput};
use std::path::Path;

pub struct ProductService {
    db: DbService,
    currency: String,
}

impl ProductService {
    pub fn new(db: DbService, currency: &str) -> Self {
        Self {
            db,
            currency: currency.to_string(),
        }
    }

    pub async fn add(&self, input: &ProductInput) -> RepoResult<Product> {
        product::create(&self.db.pool, input).await
    }

    pub async fn update(&self, input: &ProductInput) -> RepoResult<Product> {
        product::update(&self.db.pool, input).await
    }

    pub async fn remove(&self, code: &str) -> RepoResult<()> {
        product::delete(&self.db.pool, code).await
    }

    pub async fn add_count(&self, code: &str, amount: i64) -> RepoResult<()> {
        product::add_count(&self.db.pool, code, amount).await
    }

    pub async fn reduce_count(&self, code: &str, amount: i64) -> RepoResult<()> {
        product::reduce_count(&self.db.pool, code, amount).await
    }

    pub async fn list(&self, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        product::find_filtered(&self.db.pool, filter).await
    }

    /// Point lookup for an explicit list of codes; any unknown code fails.
    pub async fn by_codes(&self, codes: &[&str]) -> RepoResult<Vec<Product>> {
        let mut products = Vec::with_capacity(codes.len());
        for code in codes {
            products.push(product::get(&self.db.pool, code.trim()).await?);
        }
        Ok(products)
    }

    /// Availability totals over a listing: (total units, total stock value).
    pub fn availability_totals(products: &[Product]) -> (i64, i64) {
        let total_count = products.iter().map(|p| p.count).sum();
        let total_price = products
            .iter()
            .map(|p| p.price.unwrap_or(0) * p.count)
            .sum();
        (total_count, total_price)
    }

    // ==================== Batch imports ====================

    pub async fn add_batch(&self, path: &Path, map: &ColumnMap) -> anyhow::Result<usize> {
        let reader = SheetReader::open(path)?;
        let mut applied = 0;
        for (i, row) in reader.data_rows().iter().enumerate() {
            let input = batch::project_product(row, map, i + 2)?;
            product::create(&self.db.pool, &input).await?;
            applied += 1;
        }
        tracing::info!(rows = applied, "imported products from {}", path.display());
        Ok(applied)
    }

    pub async fn update_batch(&self, path: &Path, map: &ColumnMap) -> anyhow::Result<usize> {
        let reader = SheetReader::open(path)?;
        let mut applied = 0;
        for (i, row) in reader.data_rows().iter().enumerate() {
            let input = batch::project_product(row, map, i + 2)?;
            product::update(&self.db.pool, &input).await?;
            applied += 1;
        }
        tracing::info!(rows = applied, "updated products from {}", path.display());
        Ok(applied)
    }

    pub async fn add_count_batch(&self, path: &Path, map: &ColumnMap) -> anyhow::Result<usize> {
        let reader = SheetReader::open(path)?;
        let mut applied = 0;
        for (i, row) in reader.data_rows().iter().enumerate() {
            let input = batch::project_product(row, map, i + 2)?;
            let code = batch::required_text(input.code, "code", i + 2)?;
            let amount = batch::required_int(input.count, "count", i + 2)?;
            product::add_count(&self.db.pool, &code, amount).await?;
            applied += 1;
        }
        tracing::info!(rows = applied, "restocked products from {}", path.display());
        Ok(applied)
    }

    pub async fn reduce_count_batch(&self, path: &Path, map: &ColumnMap) -> anyhow::Result<usize> {
        let reader = SheetReader::open(path)?;
        let mut applied = 0;
        for (i, row) in reader.data_rows().iter().enumerate() {
            let input = batch::project_product(row, map, i + 2)?;
            let code = batch::required_text(input.code, "code", i + 2)?;
            let amount = batch::required_int(input.count, "count", i + 2)?;
            product::reduce_count(&self.db.pool, &code, amount).await?;
            applied += 1;
        }
        tracing::info!(rows = applied, "reduced stock from {}", path.display());
        Ok(applied)
    }

    // ==================== Sheet exports ====================

    /// Pricelist: descriptive fields and price, no stock counts.
    pub fn save_pricelist(&self, path: &Path, products: &[Product]) -> anyhow::Result<()> {
        let mut writer = SheetWriter::new(&self.currency);
        writer.add_headers(&["Code", "Description", "Brand", "CIC", "Price"]);
        writer.add_data(
            products
                .iter()
                .map(|p| {
                    vec![
                        Cell::from(p.code.as_str()),
                        Cell::from(p.description.clone()),
                        Cell::from(p.brand.clone()),
                        Cell::from(p.count_in_carton),
                        Cell::from(p.price),
                    ]
                })
                .collect(),
        );
        writer.add_row_index_column();
        writer.set_column_currency_format(4);
        writer.save(path)?;
        Ok(())
    }

    /// Availability: pricelist columns plus stock count and stock value.
    pub fn save_availability(&self, path: &Path, products: &[Product]) -> anyhow::Result<()> {
        let mut writer = SheetWriter::new(&self.currency);
        writer.add_headers(&[
            "Code",
            "Description",
            "Brand",
            "CIC",
            "Price",
            "Total Price",
            "Count",
        ]);
        writer.add_data(
            products
                .iter()
                .map(|p| {
                    vec![
                        Cell::from(p.code.as_str()),
                        Cell::from(p.description.clone()),
                        Cell::from(p.brand.clone()),
                        Cell::from(p.count_in_carton),
                        Cell::from(p.price),
                        Cell::from(p.price.unwrap_or(0) * p.count),
                        Cell::from(p.count),
                    ]
                })
                .collect(),
        );
        writer.add_row_index_column();
        writer.set_column_currency_format(4);
        writer.set_column_currency_format(5);
        writer.save(path)?;
        Ok(())
    }
}
