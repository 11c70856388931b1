pub mod delete;
pub mod upload;

pub use delete::{DeleteProductsCommand, DeleteProductsError, DeleteProductsResponse};
pub use upload::{UploadProductsError, UploadProductsResponse};
