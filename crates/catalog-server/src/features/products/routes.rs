//! Product API routes
//!
//! # Route Structure
//!
//! - `POST /upload` - Ingest a CSV or `.xlsx` file sent as multipart field `file`
//! - `GET /products` - List every product
//! - `POST /delete-products` - Delete products by SKU (`{"skuCodes": [...]}`)
//! - `GET /download-sample` - Download the catalog as `sample.csv`

use std::io;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use catalog_common::Product;
use futures::TryStreamExt;
use tokio_util::io::{ReaderStream, StreamReader};

use super::commands::{
    DeleteProductsCommand, DeleteProductsResponse, UploadProductsError, UploadProductsResponse,
};
use super::queries::SAMPLE_FILE_NAME;
use crate::error::AppError;
use crate::features::FeatureState;
use crate::ingest::FileFormat;

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "file";

pub fn products_routes() -> Router<FeatureState> {
    Router::new()
        .route("/upload", post(upload_products))
        .route("/products", get(list_products))
        .route("/delete-products", post(delete_products))
        .route("/download-sample", get(download_sample))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Ingest an uploaded product file
///
/// # Response
///
/// - `200 OK` - `{ message, successCount, errors }`, even when every row was rejected
/// - `400 Bad Request` - no `file` field, unsupported content type or unparseable file
/// - `413 Payload Too Large` - body exceeds `CATALOG_MAX_UPLOAD_BYTES`
/// - `500 Internal Server Error` - storage failure
#[tracing::instrument(skip(state, multipart))]
async fn upload_products(
    State(state): State<FeatureState>,
    mut multipart: Multipart,
) -> Result<Json<UploadProductsResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(UploadProductsError::from)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let format = FileFormat::detect(field.content_type(), field.file_name())
            .map_err(UploadProductsError::from)?;
        tracing::debug!(?format, filename = ?field.file_name(), "Receiving upload");

        let reader = StreamReader::new(Box::pin(field.map_err(io::Error::other)));
        let response = super::commands::upload::handle(&state, format, reader).await?;

        tracing::info!(
            success_count = response.success_count,
            error_count = response.errors.len(),
            "Products uploaded via API"
        );

        return Ok(Json(response));
    }

    Err(UploadProductsError::FileRequired.into())
}

/// Delete products by SKU
///
/// # Request Body
///
/// ```json
/// { "skuCodes": ["A1", "B2"] }
/// ```
///
/// # Response
///
/// - `200 OK` - `{ message, deletedCount }`
/// - `400 Bad Request` - missing, empty or unreadable `skuCodes`
/// - `500 Internal Server Error` - storage failure
#[tracing::instrument(skip(state, payload))]
async fn delete_products(
    State(state): State<FeatureState>,
    payload: Result<Json<DeleteProductsCommand>, JsonRejection>,
) -> Result<Json<DeleteProductsResponse>, AppError> {
    let Json(command) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let response = super::commands::delete::handle(state.store.as_ref(), command).await?;

    tracing::info!(deleted_count = response.deleted_count, "Products deleted via API");

    Ok(Json(response))
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(state))]
async fn list_products(State(state): State<FeatureState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = super::queries::list::handle(state.store.as_ref()).await?;
    Ok(Json(products))
}

/// Stream the catalog as a CSV attachment
#[tracing::instrument(skip(state))]
async fn download_sample(State(state): State<FeatureState>) -> Result<Response, AppError> {
    let export =
        super::queries::download_sample::handle(state.store.as_ref(), &state.export_dir).await?;

    tracing::debug!(rows = export.rows, size = export.size, "Sample download started");

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", SAMPLE_FILE_NAME),
        ),
        (header::CONTENT_LENGTH, export.size.to_string()),
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(export.file))).into_response())
}
