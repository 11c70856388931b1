//! Row reconciliation
//!
//! Applies the business rules to each parsed row and decides insert vs. reject.
//! Rows are handled strictly one after another: the uniqueness check and insert
//! for row `n` finish before row `n + 1` is looked at, so two rows of the same
//! batch sharing a new SKU can never both pass the check.

use catalog_common::types::{
    HSN_CODE_COLUMN, PRICE_COLUMN, PRODUCT_DESCRIPTION_COLUMN, PRODUCT_NAME_COLUMN,
    SKU_CODE_COLUMN,
};
use catalog_common::NewProduct;
use futures::{Stream, StreamExt};
use thiserror::Error;
use tracing::{debug, info};

use super::parser::{ParseError, RawRow};
use crate::store::{ProductStore, StoreError};

/// Position reported for the first data row (the header occupies row 1)
pub const FIRST_DATA_ROW: usize = 2;

/// Why a single row was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    #[error("Row {0}: Missing required fields")]
    MissingFields(usize),

    #[error("Row {0}: Price must be a number")]
    InvalidPrice(usize),

    #[error("Row {0}: SKU Code Product already exists")]
    DuplicateSku(usize),
}

/// Outcome of one upload batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestSummary {
    pub success_count: usize,
    /// One line per rejected row, in file order
    pub errors: Vec<String>,
}

/// Failures that abort the whole batch
#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Check one row's fields and build the product it describes
pub fn validate_row(row_number: usize, row: &RawRow) -> Result<NewProduct, RowRejection> {
    let field = |column: &str| -> Option<String> {
        row.get(column)
            .and_then(|value| value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let (Some(sku_code), Some(name), Some(description), Some(price), Some(hsn_code)) = (
        field(SKU_CODE_COLUMN),
        field(PRODUCT_NAME_COLUMN),
        field(PRODUCT_DESCRIPTION_COLUMN),
        field(PRICE_COLUMN),
        field(HSN_CODE_COLUMN),
    ) else {
        return Err(RowRejection::MissingFields(row_number));
    };

    let price = parse_price(&price).ok_or(RowRejection::InvalidPrice(row_number))?;

    Ok(NewProduct {
        sku_code,
        name,
        description,
        price,
        hsn_code,
    })
}

/// Thousands separators are dropped before parsing; only finite values count.
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

enum RowOutcome {
    Inserted,
    Rejected(RowRejection),
}

async fn reconcile_row(
    store: &dyn ProductStore,
    row_number: usize,
    row: &RawRow,
) -> Result<RowOutcome, StoreError> {
    let product = match validate_row(row_number, row) {
        Ok(product) => product,
        Err(rejection) => return Ok(RowOutcome::Rejected(rejection)),
    };

    if store.find_by_sku(&product.sku_code).await?.is_some() {
        return Ok(RowOutcome::Rejected(RowRejection::DuplicateSku(row_number)));
    }

    match store.insert(product).await {
        Ok(_) => Ok(RowOutcome::Inserted),
        Err(StoreError::DuplicateKey(_)) => {
            Ok(RowOutcome::Rejected(RowRejection::DuplicateSku(row_number)))
        },
        Err(e) => Err(e),
    }
}

/// Validate and insert every row of `rows`, in order.
///
/// Rejected rows only add a line to [`IngestSummary::errors`]. A parse failure or
/// an unexpected storage failure stops the batch; rows inserted before that point
/// stay inserted.
pub async fn reconcile<S>(store: &dyn ProductStore, mut rows: S) -> Result<IngestSummary, IngestError>
where
    S: Stream<Item = Result<RawRow, ParseError>> + Unpin,
{
    let mut summary = IngestSummary::default();
    let mut row_number = FIRST_DATA_ROW;

    while let Some(row) = rows.next().await {
        let row = row?;

        match reconcile_row(store, row_number, &row).await? {
            RowOutcome::Inserted => summary.success_count += 1,
            RowOutcome::Rejected(rejection) => {
                debug!(row = row_number, reason = %rejection, "Row rejected");
                summary.errors.push(rejection.to_string());
            },
        }

        row_number += 1;
    }

    info!(
        success_count = summary.success_count,
        error_count = summary.errors.len(),
        "Upload batch reconciled"
    );

    Ok(summary)
}
