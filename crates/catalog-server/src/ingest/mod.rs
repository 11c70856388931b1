//! File ingestion
//!
//! - [`parser`] turns an uploaded CSV or `.xlsx` byte stream into loosely typed rows
//! - [`reconciler`] validates those rows, checks SKU uniqueness against the store and
//!   inserts the survivors, collecting one error line per rejected row

pub mod parser;
pub mod reconciler;

pub use parser::{parse_rows, FileFormat, ParseError, RawRow, RowStream};
pub use reconciler::{reconcile, validate_row, IngestError, IngestSummary, RowRejection};
