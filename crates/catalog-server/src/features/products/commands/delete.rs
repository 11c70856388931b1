use serde::{Deserialize, Serialize};

use crate::store::{ProductStore, StoreError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteProductsCommand {
    #[serde(default, rename = "skuCodes")]
    pub sku_codes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductsResponse {
    pub message: String,
    pub deleted_count: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteProductsError {
    #[error("Please provide SKU codes to delete")]
    SkuCodesRequired,
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}

impl DeleteProductsCommand {
    /// Trimmed, non-blank SKUs; at least one is required
    pub fn validate(&self) -> Result<Vec<String>, DeleteProductsError> {
        let sku_codes: Vec<String> = self
            .sku_codes
            .iter()
            .flatten()
            .map(|sku| sku.trim())
            .filter(|sku| !sku.is_empty())
            .map(str::to_string)
            .collect();

        if sku_codes.is_empty() {
            return Err(DeleteProductsError::SkuCodesRequired);
        }
        Ok(sku_codes)
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn ProductStore,
    command: DeleteProductsCommand,
) -> Result<DeleteProductsResponse, DeleteProductsError> {
    let sku_codes = command.validate()?;

    let deleted_count = store.delete_by_skus(&sku_codes).await?;

    Ok(DeleteProductsResponse {
        message: format!("{} products deleted successfully.", deleted_count),
        deleted_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryProductStore;
    use catalog_common::NewProduct;

    fn command(skus: &[&str]) -> DeleteProductsCommand {
        DeleteProductsCommand {
            sku_codes: Some(skus.iter().map(|s| s.to_string()).collect()),
        }
    }

    async fn seeded_store(skus: &[&str]) -> InMemoryProductStore {
        let store = InMemoryProductStore::new();
        for sku in skus {
            store
                .insert(NewProduct {
                    sku_code: sku.to_string(),
                    name: "Pen".to_string(),
                    description: "Blue pen".to_string(),
                    price: 10.0,
                    hsn_code: "123".to_string(),
                })
                .await
                .unwrap();
        }
        store
    }

    #[test]
    fn test_validation_trims_and_drops_blanks() {
        let skus = command(&[" A1 ", "", "  ", "B2"]).validate().unwrap();
        assert_eq!(skus, vec!["A1", "B2"]);
    }

    #[test]
    fn test_validation_requires_sku_codes() {
        assert!(matches!(
            DeleteProductsCommand::default().validate(),
            Err(DeleteProductsError::SkuCodesRequired)
        ));
        assert!(matches!(
            command(&[]).validate(),
            Err(DeleteProductsError::SkuCodesRequired)
        ));
        assert!(matches!(
            command(&[" ", ""]).validate(),
            Err(DeleteProductsError::SkuCodesRequired)
        ));
    }

    #[test]
    fn test_command_deserializes_camel_case() {
        let cmd: DeleteProductsCommand =
            serde_json::from_str(r#"{"skuCodes":["A1","B2"]}"#).unwrap();
        assert_eq!(cmd.sku_codes, Some(vec!["A1".to_string(), "B2".to_string()]));

        let cmd: DeleteProductsCommand = serde_json::from_str("{}").unwrap();
        assert_eq!(cmd.sku_codes, None);
    }

    #[tokio::test]
    async fn test_handle_deletes_listed_products() {
        let store = seeded_store(&["A1", "B2", "C3"]).await;

        let response = handle(&store, command(&["A1", "C3", "missing"])).await.unwrap();

        assert_eq!(response.deleted_count, 2);
        assert_eq!(response.message, "2 products deleted successfully.");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_handle_empty_list_leaves_store_untouched() {
        let store = seeded_store(&["A1"]).await;

        let result = handle(&store, command(&[])).await;

        assert!(matches!(result, Err(DeleteProductsError::SkuCodesRequired)));
        assert_eq!(store.len().await, 1);
    }
}
