use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

use crate::model::ids::{EventId, GroupId};

//
// ─── SORT KEY ──────────────────────────────────────────────────────────────────
//

/// Parsed form of a sort key cell.
///
/// Variant order matters: numbers sort before dates, dates before free text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Number(i64),
    Date(NaiveDate),
    Text(String),
}

/// Chronological ordering field of an event (a year, a date, or free text).
///
/// The raw cell text is preserved for display and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    raw: String,
    value: SortValue,
}

impl SortKey {
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        let value = if let Ok(number) = trimmed.parse::<i64>() {
            SortValue::Number(number)
        } else if let Some(date) = parse_date(trimmed) {
            SortValue::Date(date)
        } else {
            SortValue::Text(trimmed.to_string())
        };
        Self { raw, value }
    }

    /// The cell text as it appeared in the source table.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Compares by parsed value only, ignoring formatting differences in the raw text.
    #[must_use]
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chronological_cmp(other)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw.trim())
    }
}

//
// ─── EVENT RECORD ──────────────────────────────────────────────────────────────
//

/// One row of the loaded table. Immutable once the dataset is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    id: EventId,
    event: String,
    sort_key: SortKey,
    group_id: GroupId,
}

impl EventRecord {
    #[must_use]
    pub fn new(id: EventId, event: impl Into<String>, sort_key: SortKey, group_id: GroupId) -> Self {
        Self {
            id,
            event: event.into(),
            sort_key,
            group_id,
        }
    }

    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    #[must_use]
    pub fn sort_key(&self) -> &SortKey {
        &self.sort_key
    }

    #[must_use]
    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Ascending by sort key; equal keys fall back to source row order.
    #[must_use]
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.sort_key
            .chronological_cmp(&other.sort_key)
            .then_with(|| self.id.cmp(&other.id))
    }

    /// Renders as `event（key）`, the form shown when revealing the correct order.
    #[must_use]
    pub fn labelled(&self) -> String {
        format!("{}（{}）", self.event, self.sort_key)
    }
}
