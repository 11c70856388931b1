//! Product catalog feature
//!
//! Upload and delete are commands; listing and the sample download are queries.

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    DeleteProductsCommand, DeleteProductsError, DeleteProductsResponse, UploadProductsError,
    UploadProductsResponse,
};
pub use queries::{DownloadSampleError, SampleExport};
pub use routes::products_routes;
