//! Product Catalog Server - Main entry point

use anyhow::{Context, Result};
use catalog_common::logging::{init_logging, LogConfig};
use tracing::info;

use catalog_server::{api, config::Config, features::FeatureState, store};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("catalog-server")
        .filter_directives("catalog_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting product catalog server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let store = store::connect(&config.database)
        .await
        .context("Failed to open product store")?;
    info!("Product store ready");

    let state = FeatureState::new(store.clone(), config.server.export_dir.clone());
    let result = api::serve(&config, state).await;

    store.close().await;
    result
}
