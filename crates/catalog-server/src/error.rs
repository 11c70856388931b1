//! Server-specific error types
//!
//! Feature errors convert into [`AppError`], which owns the status-code mapping.
//! Row-level rejections never reach this type: they are collected into the upload
//! summary instead.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::features::products::{DeleteProductsError, DownloadSampleError, UploadProductsError};
use crate::ingest::{IngestError, ParseError};
use crate::store::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid file format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed file: {0}")]
    MalformedFile(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::UnsupportedFormat(_) | AppError::MalformedFile(_) => {
                StatusCode::BAD_REQUEST
            },
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(message) => ErrorResponse::new("VALIDATION_ERROR", message),
            AppError::UnsupportedFormat(content_type) => ErrorResponse::with_details(
                "UNSUPPORTED_FORMAT",
                "Invalid file format",
                json!(content_type),
            ),
            AppError::MalformedFile(reason) => {
                ErrorResponse::with_details("MALFORMED_FILE", "File could not be parsed", json!(reason))
            },
            AppError::PayloadTooLarge(reason) => ErrorResponse::with_details(
                "PAYLOAD_TOO_LARGE",
                "Upload exceeds the size limit",
                json!(reason),
            ),
            AppError::Storage(ref e) => {
                tracing::error!(error = ?e, "Storage failure");
                ErrorResponse::with_details("STORAGE_ERROR", "Server error", json!(e.to_string()))
            },
            AppError::Io(reason) => {
                tracing::error!(error = %reason, "IO failure");
                ErrorResponse::with_details("IO_ERROR", "Error generating CSV", json!(reason))
            },
            AppError::Unavailable(reason) => {
                tracing::error!(error = %reason, "Health check failed");
                ErrorResponse::with_details("UNAVAILABLE", "Storage is unreachable", json!(reason))
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        if interrupted_upload_status(&err) == Some(StatusCode::PAYLOAD_TOO_LARGE) {
            return AppError::PayloadTooLarge(err.to_string());
        }
        match err {
            ParseError::UnsupportedFormat(content_type) => AppError::UnsupportedFormat(content_type),
            other => AppError::MalformedFile(other.to_string()),
        }
    }
}

/// Status of the multipart failure that cut a parse short, if any.
///
/// The body limit trips inside the field stream, so the multipart error arrives
/// wrapped in the `io::Error` the parser read through.
fn interrupted_upload_status(err: &ParseError) -> Option<StatusCode> {
    let io = match err {
        ParseError::Io(e) => e,
        ParseError::Csv(e) => match e.kind() {
            csv_async::ErrorKind::Io(e) => e,
            _ => return None,
        },
        _ => return None,
    };
    io.get_ref()?
        .downcast_ref::<MultipartError>()
        .map(MultipartError::status)
}

impl From<UploadProductsError> for AppError {
    fn from(err: UploadProductsError) -> Self {
        match err {
            UploadProductsError::Multipart(ref e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                AppError::PayloadTooLarge(e.body_text())
            },
            UploadProductsError::FileRequired | UploadProductsError::Multipart(_) => {
                AppError::Validation(err.to_string())
            },
            UploadProductsError::Ingest(IngestError::Parse(e)) => e.into(),
            UploadProductsError::Ingest(IngestError::Store(e)) => AppError::Storage(e),
        }
    }
}

impl From<DeleteProductsError> for AppError {
    fn from(err: DeleteProductsError) -> Self {
        match err {
            DeleteProductsError::SkuCodesRequired => AppError::Validation(err.to_string()),
            DeleteProductsError::Store(e) => AppError::Storage(e),
        }
    }
}

impl From<DownloadSampleError> for AppError {
    fn from(err: DownloadSampleError) -> Self {
        match err {
            DownloadSampleError::Store(e) => AppError::Storage(e),
            DownloadSampleError::Io(e) => AppError::Io(e.to_string()),
            DownloadSampleError::Csv(e) => AppError::Io(e.to_string()),
        }
    }
}
