//! Services Module
//!
//! Thin coordinators over the repositories plus the batch applier and the
//! sheet import/export paths. One service per entity family.

pub mod batch;
pub mod customer_service;
pub mod order_service;
pub mod product_service;

pub use batch::ColumnMap;
pub use customer_service::CustomerService;
pub use order_service::OrderService;
pub use product_service::ProductService;
