//! CSV snapshot of the catalog
//!
//! The snapshot is written to a uniquely named file in the export directory,
//! reopened for reading and unlinked straight away. The open handle keeps the
//! contents alive while the response streams, and nothing is left on disk when
//! the request ends, so concurrent downloads never share a file.

use std::path::{Path, PathBuf};

use catalog_common::types::CSV_COLUMNS;
use catalog_common::Product;
use tokio::fs::File;
use uuid::Uuid;

use crate::store::{ProductStore, StoreError};

/// Name offered to the browser in `Content-Disposition`
pub const SAMPLE_FILE_NAME: &str = "sample.csv";

#[derive(Debug, thiserror::Error)]
pub enum DownloadSampleError {
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode snapshot: {0}")]
    Csv(#[from] csv::Error),
}

/// An unlinked snapshot file ready to stream
#[derive(Debug)]
pub struct SampleExport {
    pub file: File,
    pub rows: usize,
    pub size: u64,
}

/// Render products as CSV with the upload column headers
pub fn render_csv(products: &[Product]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;
    for product in products {
        writer.write_record(product.csv_record())?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn snapshot_path(export_dir: &Path) -> PathBuf {
    export_dir.join(format!("sample-{}.csv", Uuid::new_v4()))
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn ProductStore,
    export_dir: &Path,
) -> Result<SampleExport, DownloadSampleError> {
    let products = store.find_all().await?;
    let contents = render_csv(&products)?;

    tokio::fs::create_dir_all(export_dir).await?;
    let path = snapshot_path(export_dir);
    tokio::fs::write(&path, &contents).await?;

    let opened = File::open(&path).await;
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove snapshot file");
    }
    let file = opened?;

    tracing::debug!(rows = products.len(), bytes = contents.len(), "Snapshot written");

    Ok(SampleExport {
        file,
        rows: products.len(),
        size: contents.len() as u64,
    })
}
