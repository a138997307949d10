//! Data access for products.
//!
//! Handlers only see [`ProductStore`]. [`PgProductStore`] is the production
//! implementation over a `sqlx` pool; [`InMemoryProductStore`] backs tests and
//! local runs without a database.

mod memory;
mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductChanges};
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Check connectivity and create the products table if it is missing.
    async fn sync(&self) -> Result<(), AppError>;

    /// Remove every product by recreating the table.
    async fn reset(&self) -> Result<(), AppError>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    /// All products, newest id first.
    async fn list_all(&self) -> Result<Vec<Product>, AppError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;

    async fn create(&self, product: NewProduct) -> Result<Product, AppError>;

    /// Overwrite name and price, and availability when given. `None` if the row is gone.
    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Option<Product>, AppError>;

    /// Negate the stored availability. `None` if the row is gone.
    async fn toggle_availability(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Release storage resources on shutdown.
    async fn close(&self);
}
