use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::info;

use timeline_core::model::{HistoryEntry, format_duration};

use crate::error::StorageError;

/// Header of the exported history table, in column order.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "group",
    "events",
    "sort_keys",
    "verdict",
    "duration",
    "cumulative_time",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const DEFAULT_PREFIX: &str = "history";

#[derive(Serialize)]
struct ExportRow<'a> {
    group: String,
    events: &'a str,
    sort_keys: &'a str,
    verdict: &'static str,
    duration: String,
    cumulative_time: &'a str,
}

/// A rendered history table ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl HistoryExport {
    /// Write the export into `dir` under its own filename.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, StorageError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "history exported");
        Ok(path)
    }
}

/// `{user}_{%Y%m%d_%H%M%S}.csv`, or `history_…` when the user name is blank.
#[must_use]
pub fn export_filename(user_name: &str, now: DateTime<FixedOffset>) -> String {
    let timestamp = now.format("%Y%m%d_%H%M%S");
    let prefix = sanitize(user_name);
    let prefix = if prefix.is_empty() {
        DEFAULT_PREFIX
    } else {
        prefix.as_str()
    };
    format!("{prefix}_{timestamp}.csv")
}

fn sanitize(user_name: &str) -> String {
    user_name
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect()
}

/// Render history as CSV: one row per entry, with the session's cumulative time on every row.
///
/// # Errors
///
/// Returns `StorageError::Csv` or `StorageError::Io` if the table cannot be written.
pub fn export_history(
    user_name: &str,
    entries: &[HistoryEntry],
    total_elapsed_secs: u64,
    now: DateTime<FixedOffset>,
) -> Result<HistoryExport, StorageError> {
    let cumulative = format_duration(total_elapsed_secs);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(UTF8_BOM.to_vec());
    writer.write_record(EXPORT_COLUMNS)?;
    for entry in entries {
        writer.serialize(ExportRow {
            group: entry.group_id().to_string(),
            events: entry.chosen_order(),
            sort_keys: entry.correct_keys(),
            verdict: entry.verdict().as_str(),
            duration: format_duration(entry.duration_secs()),
            cumulative_time: &cumulative,
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| StorageError::Io(err.into_error()))?;

    Ok(HistoryExport {
        filename: export_filename(user_name, now),
        bytes,
    })
}
