//! Customer Service

use crate::db::DbService;
use crate::db::repository::{RepoResult, customer};
use shared::models::{Customer, CustomerFilter};

pub struct CustomerService {
    db: DbService,
}

impl CustomerService {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str) -> RepoResult<Customer> {
        customer::create(&self.db.pool, name).await
    }

    pub async fn list(&self, filter: &CustomerFilter) -> RepoResult<Vec<Customer>> {
        customer::find_filtered(&self.db.pool, filter).await
    }
}
