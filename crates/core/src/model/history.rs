use serde::Serialize;

use crate::model::ids::{EventId, GroupId};
use crate::model::question::{Question, Verdict};
use crate::model::record::EventRecord;

/// Separator between events in the submitted order.
pub const EVENT_SEPARATOR: &str = " ➞ ";

/// Separator between sort keys in the correct order.
pub const KEY_SEPARATOR: &str = " / ";

/// Renders whole seconds as `{m}m{s}s`.
#[must_use]
pub fn format_duration(secs: u64) -> String {
    format!("{}m{}s", secs / 60, secs % 60)
}

//
// ─── HISTORY ENTRY ─────────────────────────────────────────────────────────────
//

/// Result of one scored question. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    group_id: GroupId,
    chosen_order: String,
    correct_keys: String,
    verdict: Verdict,
    duration_secs: u64,
}

impl HistoryEntry {
    /// Build an entry from the question, the submitted ids and the verdict.
    ///
    /// Ids that do not belong to the question are skipped in the joined text.
    #[must_use]
    pub fn new(question: &Question, chosen: &[EventId], verdict: Verdict, duration_secs: u64) -> Self {
        let chosen_order = chosen
            .iter()
            .filter_map(|id| question.item(*id))
            .map(EventRecord::event)
            .collect::<Vec<_>>()
            .join(EVENT_SEPARATOR);
        let correct_keys = question
            .items()
            .iter()
            .map(|record| record.sort_key().to_string())
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR);

        Self {
            group_id: question.group_id(),
            chosen_order,
            correct_keys,
            verdict,
            duration_secs,
        }
    }

    #[must_use]
    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    #[must_use]
    pub fn chosen_order(&self) -> &str {
        &self.chosen_order
    }

    #[must_use]
    pub fn correct_keys(&self) -> &str {
        &self.correct_keys
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    #[must_use]
    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }
}

//
// ─── HISTORY ───────────────────────────────────────────────────────────────────
//

/// Append-only ledger of scored questions plus the cumulative time spent answering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    total_elapsed_secs: u64,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Its duration is charged regardless of the verdict.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.total_elapsed_secs = self.total_elapsed_secs.saturating_add(entry.duration_secs);
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn total_elapsed_secs(&self) -> u64 {
        self.total_elapsed_secs
    }

    /// Number of correct entries.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.entries.iter().filter(|e| e.verdict.is_correct()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::SortKey;

    fn question() -> Question {
        let records = ["A:1900", "B:1920", "C:1950", "D:1980"]
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let (event, key) = raw.split_once(':').unwrap();
                EventRecord::new(
                    EventId::new(i as u32),
                    event,
                    SortKey::parse(key),
                    GroupId::new(2),
                )
            })
            .collect();
        let presented = (0..4).rev().map(EventId::new).collect();
        Question::new(GroupId::new(2), records, presented).unwrap()
    }

    #[test]
    fn format_duration_splits_minutes() {
        assert_eq!(format_duration(0), "0m0s");
        assert_eq!(format_duration(7), "0m7s");
        assert_eq!(format_duration(65), "1m5s");
        assert_eq!(format_duration(3600), "60m0s");
    }

    #[test]
    fn entry_joins_chosen_events_and_correct_keys() {
        let chosen = [0, 2, 1, 3].map(EventId::new);
        let entry = HistoryEntry::new(&question(), &chosen, Verdict::Incorrect, 12);
        assert_eq!(entry.group_id(), GroupId::new(2));
        assert_eq!(entry.chosen_order(), "A ➞ C ➞ B ➞ D");
        assert_eq!(entry.correct_keys(), "1900 / 1920 / 1950 / 1980");
        assert_eq!(entry.verdict(), Verdict::Incorrect);
        assert_eq!(entry.duration_secs(), 12);
    }

    #[test]
    fn record_charges_time_for_both_verdicts() {
        let q = question();
        let mut history = History::new();
        history.record(HistoryEntry::new(&q, &[], Verdict::Incorrect, 10));
        assert_eq!(history.total_elapsed_secs(), 10);
        history.record(HistoryEntry::new(&q, &[], Verdict::Correct, 5));
        assert_eq!(history.total_elapsed_secs(), 15);
        assert_eq!(history.len(), 2);
        assert_eq!(history.correct_count(), 1);
    }
}
