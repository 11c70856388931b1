//! Feature modules implementing the catalog API
//!
//! Each feature is a vertical slice with its own commands, queries and routes.
//!
//! # Features
//!
//! - **products**: file upload, listing, deletion by SKU and the CSV snapshot download
//!
//! # Architecture
//!
//! - `commands/` - Write operations (upload, delete)
//! - `queries/` - Read operations (list, download sample)
//! - `routes.rs` - HTTP route definitions

pub mod products;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::sync::Mutex;

use crate::store::ProductStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Product record store
    pub store: Arc<dyn ProductStore>,
    /// Directory for the per-request snapshot files
    pub export_dir: PathBuf,
    /// Held for the duration of an upload batch
    pub ingest_lock: Arc<Mutex<()>>,
}

impl FeatureState {
    pub fn new(store: Arc<dyn ProductStore>, export_dir: PathBuf) -> Self {
        Self {
            store,
            export_dir,
            ingest_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Creates the router with all feature routes mounted at the root
///
/// - `POST /upload`
/// - `GET /products`
/// - `POST /delete-products`
/// - `GET /download-sample`
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().merge(products::products_routes().with_state(state))
}
