//! Product Catalog Server Library
//!
//! HTTP service that ingests spreadsheet/CSV product files into a keyed store.
//!
//! # Overview
//!
//! - **Ingestion**: `POST /upload` streams a CSV (or buffers an `.xlsx`) through the
//!   [`ingest::parser`] and hands the rows to the [`ingest::reconciler`], which
//!   validates each row, checks SKU uniqueness and inserts, collecting per-row errors
//! - **Queries**: `GET /products` lists every record, `GET /download-sample` streams a
//!   CSV snapshot of the catalog
//! - **Commands**: `POST /delete-products` removes records by SKU
//! - **Storage**: the [`store::ProductStore`] trait, backed by PostgreSQL (`sqlx`) or an
//!   in-process map for local development and tests
//!
//! # Architecture
//!
//! Each feature is a vertical slice with `commands/` (writes), `queries/` (reads)
//! and `routes.rs` (HTTP mapping). Route handlers do no business logic beyond
//! extraction, dispatch and status-code mapping.
//!
//! Rows inside one upload are processed strictly in order: each row's uniqueness
//! check and insert complete before the next row is examined, so two rows sharing a
//! new SKU in one batch cannot both be inserted. Uploads are additionally serialised
//! per process; the store's unique constraint is the final backstop across processes.
//!
//! # Example
//!
//! ```no_run
//! use catalog_server::{api, config::Config, features::FeatureState, store};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = store::connect(&config.database).await?;
//!     let state = FeatureState::new(store.clone(), config.server.export_dir.clone());
//!     api::serve(&config, state).await?;
//!     store.close().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod store;

// Re-export commonly used types
pub use error::AppError;
pub use store::{ProductStore, StoreError, StoreResult};
