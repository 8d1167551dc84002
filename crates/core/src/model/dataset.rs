use thiserror::Error;

use crate::model::ids::{EventId, GroupId};
use crate::model::record::{EventRecord, SortKey};

/// Number of consecutive rows that share a group.
pub const GROUP_SIZE: usize = 10;

/// Number of events in every question.
pub const QUESTION_SIZE: usize = 4;

const EVENT_COLUMNS: &[&str] = &["event", "出来事"];
const SORT_KEY_COLUMNS: &[&str] = &["sortkey", "sort_key", "年号"];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("dataset has too many rows: {len}")]
    TooManyRows { len: usize },
}

//
// ─── RAW TABLE ─────────────────────────────────────────────────────────────────
//

/// Untyped rows as produced by a file reader, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    fn column(&self, aliases: &[&str]) -> Option<usize> {
        self.headers.iter().position(|header| {
            let header = normalize_header(header);
            aliases.iter().any(|alias| header == *alias)
        })
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_ascii_lowercase()
}

//
// ─── DATASET ───────────────────────────────────────────────────────────────────
//

/// Validated event table, bucketed into groups of `GROUP_SIZE` rows by insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<EventRecord>,
}

impl Dataset {
    /// Validate a raw table and assign every row to its group.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::MissingColumns` if the event or sort key column is absent.
    /// Returns `DatasetError::EmptyDataset` if the table has no data rows.
    pub fn load(table: &RawTable) -> Result<Self, DatasetError> {
        let event_col = table.column(EVENT_COLUMNS);
        let key_col = table.column(SORT_KEY_COLUMNS);

        let (event_col, key_col) = match (event_col, key_col) {
            (Some(event_col), Some(key_col)) => (event_col, key_col),
            (event_col, key_col) => {
                let mut missing = Vec::new();
                if event_col.is_none() {
                    missing.push("event".to_string());
                }
                if key_col.is_none() {
                    missing.push("sortKey".to_string());
                }
                return Err(DatasetError::MissingColumns { missing });
            }
        };

        let cell = |row: &[String], idx: usize| row.get(idx).cloned().unwrap_or_default();
        Self::from_pairs(
            table
                .rows
                .iter()
                .map(|row| (cell(row, event_col), cell(row, key_col))),
        )
    }

    /// Build a dataset from `(event, sort key)` pairs in source order.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::EmptyDataset` if no pairs are given.
    pub fn from_pairs<E, K>(pairs: impl IntoIterator<Item = (E, K)>) -> Result<Self, DatasetError>
    where
        E: Into<String>,
        K: Into<String>,
    {
        let mut records = Vec::new();
        for (position, (event, key)) in pairs.into_iter().enumerate() {
            let id = u32::try_from(position)
                .map_err(|_| DatasetError::TooManyRows { len: position + 1 })?;
            records.push(EventRecord::new(
                EventId::new(id),
                event,
                SortKey::parse(key),
                GroupId::for_position(position, GROUP_SIZE),
            ));
        }

        if records.is_empty() {
            return Err(DatasetError::EmptyDataset);
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }


    /// All group ids in ascending order.
    #[must_use]
    pub fn groups(&self) -> Vec<GroupId> {
        let count = self.records.len().div_ceil(GROUP_SIZE);
        (0..count)
            .map(|idx| GroupId::for_position(idx * GROUP_SIZE, GROUP_SIZE))
            .collect()
    }

    /// Records of one group in insertion order. Unknown groups yield an empty slice.
    #[must_use]
    pub fn records_in(&self, group: GroupId) -> &[EventRecord] {
        let Some(number) = (group.value() as usize).checked_sub(1) else {
            return &[];
        };
        let start = number.saturating_mul(GROUP_SIZE);
        if start >= self.records.len() {
            return &[];
        }
        let end = (start + GROUP_SIZE).min(self.records.len());
        &self.records[start..end]
    }

    /// Groups with at least `QUESTION_SIZE` records.
    #[must_use]
    pub fn eligible_groups(&self) -> Vec<GroupId> {
        self.groups()
            .into_iter()
            .filter(|group| self.records_in(*group).len() >= QUESTION_SIZE)
            .collect()
    }
}
