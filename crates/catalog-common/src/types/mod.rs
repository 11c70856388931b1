//! Product catalog domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Column Labels
// ============================================================================

/// Header label for the SKU column in uploaded and exported files
pub const SKU_CODE_COLUMN: &str = "SKU Code";

/// Header label for the product name column
pub const PRODUCT_NAME_COLUMN: &str = "Product Name";

/// Header label for the product description column
pub const PRODUCT_DESCRIPTION_COLUMN: &str = "Product Description";

/// Header label for the price column
pub const PRICE_COLUMN: &str = "Price";

/// Header label for the HSN code column
pub const HSN_CODE_COLUMN: &str = "HSN Code";

/// The five recognised columns, in export order
pub const CSV_COLUMNS: [&str; 5] = [
    SKU_CODE_COLUMN,
    PRODUCT_NAME_COLUMN,
    PRODUCT_DESCRIPTION_COLUMN,
    PRICE_COLUMN,
    HSN_CODE_COLUMN,
];

// ============================================================================
// Records
// ============================================================================

/// A stored product.
///
/// Products are created once by ingestion and only ever removed by a bulk delete;
/// there is no update path. `sku_code` is unique across the store.
///
/// # Examples
///
/// ```rust
/// use catalog_common::types::NewProduct;
///
/// let product = NewProduct {
///     sku_code: "A1".to_string(),
///     name: "Pen".to_string(),
///     description: "Blue pen".to_string(),
///     price: 10.0,
///     hsn_code: "123".to_string(),
/// }
/// .into_product(uuid::Uuid::new_v4(), chrono::Utc::now());
///
/// assert_eq!(product.csv_record()[3], "10");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Store-assigned identifier
    pub id: Uuid,

    /// Stock-keeping unit, the natural key
    pub sku_code: String,

    pub name: String,

    pub description: String,

    pub price: f64,

    /// Harmonized classification code, opaque to the catalog
    pub hsn_code: String,

    /// Timestamp when the product was ingested
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Field values in [`CSV_COLUMNS`] order
    pub fn csv_record(&self) -> [String; 5] {
        [
            self.sku_code.clone(),
            self.name.clone(),
            self.description.clone(),
            self.price.to_string(),
            self.hsn_code.clone(),
        ]
    }
}

/// A validated product that has not been stored yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub sku_code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub hsn_code: String,
}

impl NewProduct {
    /// Attach store-assigned identity
    pub fn into_product(self, id: Uuid, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            sku_code: self.sku_code,
            name: self.name,
            description: self.description,
            price: self.price,
            hsn_code: self.hsn_code,
            created_at,
        }
    }
}
