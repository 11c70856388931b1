use catalog_common::Product;

use crate::store::{ProductStore, StoreResult};

/// Every stored product, oldest first
#[tracing::instrument(skip(store))]
pub async fn handle(store: &dyn ProductStore) -> StoreResult<Vec<Product>> {
    let products = store.find_all().await?;
    tracing::debug!(count = products.len(), "Products listed");
    Ok(products)
}
