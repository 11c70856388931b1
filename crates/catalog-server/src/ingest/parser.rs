//! Upload parsing
//!
//! Purely structural: headers become keys, cells become values, nothing is
//! validated here. CSV rows are read incrementally from the request body while
//! spreadsheets are buffered and parsed in full before the first row is yielded.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::{
    future,
    stream::{self, BoxStream},
    StreamExt,
};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

/// MIME type browsers send for `.csv`
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// MIME type browsers send for `.xlsx`
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One parsed row keyed by header label. Absent and empty cells map to `None`.
pub type RawRow = HashMap<String, Option<String>>;

pub type RowStream<'a> = BoxStream<'a, Result<RawRow, ParseError>>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv_async::Error),

    #[error("Malformed spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("Spreadsheet contains no worksheets")]
    EmptyWorkbook,

    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Spreadsheet,
}

impl FileFormat {
    /// Pick a parser from the declared content type.
    ///
    /// The file extension is only consulted when the client sent no type or the
    /// generic `application/octet-stream`.
    pub fn detect(content_type: Option<&str>, filename: Option<&str>) -> Result<Self, ParseError> {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match essence.as_str() {
            CSV_CONTENT_TYPE | "application/csv" => Ok(FileFormat::Csv),
            XLSX_CONTENT_TYPE => Ok(FileFormat::Spreadsheet),
            "" | "application/octet-stream" => Self::from_extension(filename).ok_or_else(|| {
                ParseError::UnsupportedFormat(filename.unwrap_or("unnamed upload").to_string())
            }),
            other => Err(ParseError::UnsupportedFormat(other.to_string())),
        }
    }

    fn from_extension(filename: Option<&str>) -> Option<Self> {
        let extension = filename?.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Spreadsheet),
            _ => None,
        }
    }
}

/// Parse `reader` as `format`, yielding rows in file order
pub fn parse_rows<'a, R>(format: FileFormat, reader: R) -> RowStream<'a>
where
    R: AsyncRead + Unpin + Send + 'a,
{
    match format {
        FileFormat::Csv => csv_rows(reader),
        FileFormat::Spreadsheet => spreadsheet_rows(reader),
    }
}

fn csv_rows<'a, R>(reader: R) -> RowStream<'a>
where
    R: AsyncRead + Unpin + Send + 'a,
{
    let mut csv = AsyncReaderBuilder::new().flexible(true).create_reader(reader);

    stream::once(async move {
        let headers: Vec<String> = csv.headers().await?.iter().map(normalize_header).collect();
        Ok::<_, ParseError>((headers, csv))
    })
    .map(|opened| match opened {
        Ok((headers, csv)) => csv
            .into_records()
            .map(move |record: csv_async::Result<StringRecord>| -> Result<RawRow, ParseError> {
                let record = record?;
                Ok(headers
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        let value = record.get(i).filter(|v| !v.is_empty());
                        (header.clone(), value.map(str::to_string))
                    })
                    .collect())
            })
            .left_stream(),
        Err(e) => stream::once(future::ready(Err(e))).right_stream(),
    })
    .flatten()
    .boxed()
}

fn spreadsheet_rows<'a, R>(mut reader: R) -> RowStream<'a>
where
    R: AsyncRead + Unpin + Send + 'a,
{
    stream::once(async move {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;
        let rows = tokio::task::spawn_blocking(move || parse_workbook(buffer))
            .await
            .map_err(std::io::Error::other)??;
        Ok::<_, ParseError>(rows)
    })
    .map(|parsed| match parsed {
        Ok(rows) => stream::iter(rows.into_iter().map(Ok)).left_stream(),
        Err(e) => stream::once(future::ready(Err(e))).right_stream(),
    })
    .flatten()
    .boxed()
}

/// Read the first worksheet: first row is the header, fully blank rows are skipped
fn parse_workbook(bytes: Vec<u8>) -> Result<Vec<RawRow>, ParseError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| cell_text(cell).map(|h| normalize_header(&h)))
        .collect();

    Ok(rows
        .filter(|cells| cells.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter_map(|(header, cell)| header.clone().map(|h| (h, cell_text(cell))))
                .collect()
        })
        .collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}
