#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod import;

pub use error::StorageError;
pub use export::{EXPORT_COLUMNS, HistoryExport, export_filename, export_history};
pub use import::{SourceEncoding, decode, load_dataset, parse_table, read_dataset};
