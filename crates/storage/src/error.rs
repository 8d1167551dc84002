use thiserror::Error;

use timeline_core::model::DatasetError;

/// Errors surfaced by the CSV import/export adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("input is neither valid UTF-8 nor Shift_JIS")]
    EncodingFailure,

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
