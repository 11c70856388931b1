use serde::Serialize;
use tokio::io::AsyncRead;

use crate::features::FeatureState;
use crate::ingest::{self, FileFormat, IngestError, IngestSummary, ParseError};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadProductsResponse {
    pub message: String,
    pub success_count: usize,
    pub errors: Vec<String>,
}

impl From<IngestSummary> for UploadProductsResponse {
    fn from(summary: IngestSummary) -> Self {
        Self {
            message: format!("{} products uploaded successfully", summary.success_count),
            success_count: summary.success_count,
            errors: summary.errors,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadProductsError {
    #[error("A file is required in the 'file' form field")]
    FileRequired,
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl From<ParseError> for UploadProductsError {
    fn from(err: ParseError) -> Self {
        Self::Ingest(IngestError::Parse(err))
    }
}

/// Ingest one uploaded file. Batches from concurrent requests run one at a time.
#[tracing::instrument(skip(state, reader))]
pub async fn handle<R>(
    state: &FeatureState,
    format: FileFormat,
    reader: R,
) -> Result<UploadProductsResponse, UploadProductsError>
where
    R: AsyncRead + Unpin + Send,
{
    let _batch = state.ingest_lock.lock().await;

    let rows = ingest::parse_rows(format, reader);
    let summary = ingest::reconcile(state.store.as_ref(), rows).await?;

    Ok(summary.into())
}
