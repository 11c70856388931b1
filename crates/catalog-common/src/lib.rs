//! Product Catalog Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and logging for the product catalog workspace.
//!
//! # Overview
//!
//! - **Types**: the product record, its insertable form, and the CSV column labels
//!   used both when ingesting uploads and when exporting snapshots
//! - **Logging**: `tracing` subscriber setup driven by environment variables
//!
//! # Example
//!
//! ```no_run
//! use catalog_common::logging::{init_logging, LogConfig};
//! use catalog_common::types::CSV_COLUMNS;
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!(columns = ?CSV_COLUMNS, "Catalog columns");
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod types;

pub use types::{NewProduct, Product};
