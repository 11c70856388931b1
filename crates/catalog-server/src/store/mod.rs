//! Product record store
//!
//! Durable persistence keyed by `sku_code`. Each operation is atomic on its own;
//! there is no batching across operations, so an upload that fails halfway keeps
//! the rows it already inserted.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_common::{NewProduct, Product};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

/// Record store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// The SKU is already stored (unique constraint)
    #[error("Product with SKU code '{0}' already exists")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed storage for product records
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every stored product, oldest first
    async fn find_all(&self) -> StoreResult<Vec<Product>>;

    async fn find_by_sku(&self, sku_code: &str) -> StoreResult<Option<Product>>;

    /// Store a new product, assigning its id and creation time.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the SKU already exists.
    async fn insert(&self, product: NewProduct) -> StoreResult<Product>;

    /// Remove every product whose SKU is listed, returning how many were removed
    async fn delete_by_skus(&self, sku_codes: &[String]) -> StoreResult<u64>;

    async fn health_check(&self) -> StoreResult<()>;

    /// Release backing resources. Called once on shutdown.
    async fn close(&self) {}
}

/// Open the store selected by `config.url`.
///
/// `memory://` yields a fresh [`InMemoryProductStore`]; anything else is treated as
/// a PostgreSQL connection string and migrated before it is returned.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<Arc<dyn ProductStore>> {
    if config.is_memory() {
        info!("Using in-memory product store; records will not survive a restart");
        return Ok(Arc::new(InMemoryProductStore::new()));
    }

    let store = PgProductStore::connect(config).await?;
    store.migrate().await?;
    info!("Database migrations completed");

    Ok(Arc::new(store))
}
