//! In-process product store
//!
//! Used for local development (`DATABASE_URL=memory://`) and tests. Insertion order
//! is preserved and the SKU uniqueness check happens under the write lock, so it
//! enforces the same constraint as the database.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_common::{NewProduct, Product};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductStore, StoreError, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_sku(&self, sku_code: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.sku_code == sku_code)
            .cloned())
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.sku_code == product.sku_code) {
            return Err(StoreError::DuplicateKey(product.sku_code));
        }

        let product = product.into_product(Uuid::new_v4(), Utc::now());
        products.push(product.clone());
        Ok(product)
    }

    async fn delete_by_skus(&self, sku_codes: &[String]) -> StoreResult<u64> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| !sku_codes.contains(&p.sku_code));
        Ok((before - products.len()) as u64)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
