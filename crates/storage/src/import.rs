use std::path::Path;

use encoding_rs::SHIFT_JIS;
use tracing::{debug, warn};

use timeline_core::model::{Dataset, RawTable};

use crate::error::StorageError;

/// Encoding a source file was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    ShiftJis,
}

/// Decode file bytes as UTF-8 (BOM stripped), falling back to Shift_JIS once.
///
/// # Errors
///
/// Returns `StorageError::EncodingFailure` if neither decoding succeeds.
pub fn decode(bytes: &[u8]) -> Result<(String, SourceEncoding), StorageError> {
    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return Ok((text.to_owned(), SourceEncoding::Utf8));
    }

    warn!("input is not valid UTF-8, retrying as Shift_JIS");
    SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text.into_owned(), SourceEncoding::ShiftJis))
        .ok_or(StorageError::EncodingFailure)
}

/// Split CSV text into a header row and data rows. Ragged rows are accepted.
///
/// # Errors
///
/// Returns `StorageError::Csv` for malformed CSV (e.g. an unterminated quote).
pub fn parse_table(text: &str) -> Result<RawTable, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.iter().map(str::to_owned).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(RawTable::new(headers, rows))
}

/// Decode, parse and validate an uploaded table.
///
/// # Errors
///
/// Returns `StorageError::EncodingFailure`, `StorageError::Csv`, or
/// `StorageError::Dataset` (missing columns, empty table).
pub fn read_dataset(bytes: &[u8]) -> Result<Dataset, StorageError> {
    let (text, encoding) = decode(bytes)?;
    let table = parse_table(&text)?;
    let dataset = Dataset::load(&table)?;
    debug!(?encoding, rows = dataset.len(), groups = dataset.groups().len(), "dataset loaded");
    Ok(dataset)
}

/// Read a dataset from a CSV file on disk.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, otherwise as [`read_dataset`].
pub fn load_dataset(path: &Path) -> Result<Dataset, StorageError> {
    let bytes = std::fs::read(path)?;
    read_dataset(&bytes)
}
