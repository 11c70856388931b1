//! Shared helpers for catalog server integration tests
//!
//! Every test gets its own in-memory store and export directory, driven through
//! the full router (middleware included) with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use catalog_server::{api, config::Config, features::FeatureState, store::InMemoryProductStore};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "catalog-test-boundary";

pub const CSV_HEADER: &str = "SKU Code,Product Name,Product Description,Price,HSN Code";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct TestApp {
    pub router: Router,
    pub store: InMemoryProductStore,
    pub export_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(mut config: Config) -> Self {
        let export_dir = tempfile::tempdir().unwrap();
        config.server.export_dir = export_dir.path().to_path_buf();

        let store = InMemoryProductStore::new();
        let state = FeatureState::new(Arc::new(store.clone()), config.server.export_dir.clone());
        let router = api::create_router(state, &config);

        Self {
            router,
            store,
            export_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec(), headers)
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body, _) = self
            .send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let (status, body, _) = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// Upload `content` as multipart field `field_name`
    pub async fn upload(
        &self,
        field_name: &str,
        filename: &str,
        content_type: Option<&str>,
        content: &[u8],
    ) -> (StatusCode, serde_json::Value) {
        let body = multipart_body(field_name, filename, content_type, content);
        self.post_multipart(Body::from(body)).await
    }

    /// Upload a CSV file whose multipart body arrives in `chunk_size` pieces
    pub async fn upload_csv_in_chunks(
        &self,
        csv: &str,
        chunk_size: usize,
    ) -> (StatusCode, serde_json::Value) {
        let body = multipart_body("file", "products.csv", Some("text/csv"), csv.as_bytes());
        let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
            body.chunks(chunk_size).map(|chunk| Ok(chunk.to_vec())).collect();
        self.post_multipart(Body::from_stream(futures::stream::iter(chunks)))
            .await
    }

    async fn post_multipart(&self, body: Body) -> (StatusCode, serde_json::Value) {
        let (status, body, _) = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={}", BOUNDARY),
                    )
                    .body(body)
                    .unwrap(),
            )
            .await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn upload_csv(&self, csv: &str) -> (StatusCode, serde_json::Value) {
        self.upload("file", "products.csv", Some("text/csv"), csv.as_bytes())
            .await
    }
}

/// Build a single-part `multipart/form-data` body
pub fn multipart_body(
    field_name: &str,
    filename: &str,
    content_type: Option<&str>,
    content: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, filename
        )
        .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// CSV with the standard header followed by `rows`
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut csv = String::from(CSV_HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    csv
}
