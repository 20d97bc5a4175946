//! Persistence for products and orders.
//!
//! Handlers never touch a concrete store. They go through the [`Repository`]
//! trait object held by [`crate::state::AppState`], which is one of:
//!
//! - [`PgRepository`] - `PostgreSQL` via `sqlx` (products table, orders table
//!   with line items as a JSONB document)
//! - [`MemoryRepository`] - lock-protected in-process collections, selected by
//!   the `memory://` connection string
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p vibe-commerce-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;
pub mod seed;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use vibe_commerce_core::{
    NewProduct, Order, OrderId, OrderNumber, Product, ProductId, ProductUpdate,
};

use crate::config::{ApiConfig, StoreBackend};

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., duplicate order number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Single-record operations over the product and order collections.
///
/// No operation spans more than one record, except [`Repository::create_products`]
/// which is only used for seeding.
#[async_trait]
pub trait Repository: Send + Sync {
    /// All products, in no guaranteed order.
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Number of stored products.
    async fn count_products(&self) -> Result<i64, RepositoryError>;

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Persist a new product, assigning its identifier and timestamp.
    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    /// Persist several products at once.
    async fn create_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Apply a partial update. `Ok(None)` if no product has this id.
    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Delete a product. `Ok(false)` if no product has this id.
    async fn delete_product(&self, id: ProductId) -> Result<bool, RepositoryError>;

    /// Persist a fully-built order and return the stored record.
    ///
    /// Fails with [`RepositoryError::Conflict`] if the order number is taken.
    async fn insert_order(&self, order: Order) -> Result<Order, RepositoryError>;

    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    async fn get_order_by_number(
        &self,
        number: &OrderNumber,
    ) -> Result<Option<Order>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Open the store selected by the configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if a `PostgreSQL` pool cannot be created.
pub async fn connect(config: &ApiConfig) -> Result<Arc<dyn Repository>, sqlx::Error> {
    match config.store_backend() {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryRepository::new()))
        }
        StoreBackend::Postgres => {
            let pool = create_pool(&config.database_url).await?;
            tracing::info!("Database pool created");
            Ok(Arc::new(PgRepository::new(pool)))
        }
    }
}
