use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::dataset::QUESTION_SIZE;
use crate::model::ids::{EventId, GroupId};
use crate::model::record::EventRecord;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("{group} has {len} records, at least {QUESTION_SIZE} are required")]
    InsufficientGroupSize { group: GroupId, len: usize },

    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),

    #[error("question needs exactly {QUESTION_SIZE} distinct events, got {len}")]
    WrongItemCount { len: usize },

    #[error("presented order is not a permutation of the question items")]
    PresentationMismatch,
}

//
// ─── VERDICT ───────────────────────────────────────────────────────────────────
//

/// Binary outcome of comparing a submitted order against the correct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Correct => "correct",
            Verdict::Incorrect => "incorrect",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Four events from one group, kept both in correct order and in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    group_id: GroupId,
    items: Vec<EventRecord>,
    presented: Vec<EventId>,
}

impl Question {
    /// Build a question from sampled records and the order they are shown in.
    ///
    /// `sample` may be in any order; items are sorted ascending by sort key with
    /// ties resolved by source row order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::WrongItemCount` unless there are exactly `QUESTION_SIZE` distinct records.
    /// Returns `QuestionError::PresentationMismatch` if `presented` is not a permutation of them.
    pub fn new(
        group_id: GroupId,
        mut sample: Vec<EventRecord>,
        presented: Vec<EventId>,
    ) -> Result<Self, QuestionError> {
        sample.sort_by(EventRecord::chronological_cmp);
        let distinct = sample.windows(2).all(|pair| pair[0].id() != pair[1].id());
        if sample.len() != QUESTION_SIZE || !distinct {
            return Err(QuestionError::WrongItemCount { len: sample.len() });
        }

        let mut question = Self {
            group_id,
            items: sample,
            presented: Vec::new(),
        };
        question.set_presented(presented)?;
        Ok(question)
    }

    #[must_use]
    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Items in correct (ascending) order.
    #[must_use]
    pub fn items(&self) -> &[EventRecord] {
        &self.items
    }

    #[must_use]
    pub fn presented(&self) -> &[EventId] {
        &self.presented
    }

    /// Ids in correct order.
    pub fn correct_order(&self) -> impl Iterator<Item = EventId> + '_ {
        self.items.iter().map(EventRecord::id)
    }

    #[must_use]
    pub fn item(&self, id: EventId) -> Option<&EventRecord> {
        self.items.iter().find(|record| record.id() == id)
    }

    /// Replace the presentation order, e.g. after the user resets the question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::PresentationMismatch` if `presented` is not a permutation of the items.
    pub fn set_presented(&mut self, presented: Vec<EventId>) -> Result<(), QuestionError> {
        let mut sorted = presented.clone();
        sorted.sort_unstable();
        let mut expected: Vec<_> = self.correct_order().collect();
        expected.sort_unstable();
        if sorted != expected {
            return Err(QuestionError::PresentationMismatch);
        }
        self.presented = presented;
        Ok(())
    }

    /// Correct order rendered as `event（key）` labels.
    #[must_use]
    pub fn labelled_answer(&self) -> Vec<String> {
        self.items.iter().map(EventRecord::labelled).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::SortKey;

    fn record(id: u32, event: &str, key: &str) -> EventRecord {
        EventRecord::new(EventId::new(id), event, SortKey::parse(key), GroupId::new(1))
    }

    fn sample() -> Vec<EventRecord> {
        vec![
            record(2, "C", "1950"),
            record(0, "A", "1900"),
            record(3, "D", "1980"),
            record(1, "B", "1920"),
        ]
    }

    fn ids(raw: &[u32]) -> Vec<EventId> {
        raw.iter().copied().map(EventId::new).collect()
    }

    #[test]
    fn items_are_sorted_ascending() {
        let question = Question::new(GroupId::new(1), sample(), ids(&[3, 1, 0, 2])).unwrap();
        let events: Vec<_> = question.items().iter().map(EventRecord::event).collect();
        assert_eq!(events, vec!["A", "B", "C", "D"]);
        assert_eq!(question.presented(), ids(&[3, 1, 0, 2]).as_slice());
        assert_eq!(question.correct_order().collect::<Vec<_>>(), ids(&[0, 1, 2, 3]));
    }

    #[test]
    fn equal_keys_keep_row_order() {
        let records = vec![
            record(7, "late row", "1900"),
            record(4, "early row", "1900"),
            record(5, "x", "1800"),
            record(6, "y", "2000"),
        ];
        let question = Question::new(GroupId::new(1), records, ids(&[4, 5, 6, 7])).unwrap();
        let events: Vec<_> = question.items().iter().map(EventRecord::event).collect();
        assert_eq!(events, vec!["x", "early row", "late row", "y"]);
    }

    #[test]
    fn rejects_wrong_sizes_and_duplicates() {
        let mut three = sample();
        three.pop();
        let err = Question::new(GroupId::new(1), three, ids(&[0, 1, 2])).unwrap_err();
        assert_eq!(err, QuestionError::WrongItemCount { len: 3 });

        let mut dup = sample();
        dup[0] = record(0, "A", "1900");
        let err = Question::new(GroupId::new(1), dup, ids(&[0, 0, 1, 3])).unwrap_err();
        assert!(matches!(err, QuestionError::WrongItemCount { .. }));
    }

    #[test]
    fn presented_must_be_permutation() {
        let err = Question::new(GroupId::new(1), sample(), ids(&[0, 1, 2, 9])).unwrap_err();
        assert_eq!(err, QuestionError::PresentationMismatch);

        let mut question = Question::new(GroupId::new(1), sample(), ids(&[0, 1, 2, 3])).unwrap();
        assert!(question.set_presented(ids(&[0, 1, 2])).is_err());
        assert_eq!(question.presented(), ids(&[0, 1, 2, 3]).as_slice());
        question.set_presented(ids(&[3, 2, 1, 0])).unwrap();
        assert_eq!(question.presented(), ids(&[3, 2, 1, 0]).as_slice());
    }

    #[test]
    fn labelled_answer_uses_original_values() {
        let question = Question::new(GroupId::new(1), sample(), ids(&[0, 1, 2, 3])).unwrap();
        assert_eq!(
            question.labelled_answer(),
            vec!["A（1900）", "B（1920）", "C（1950）", "D（1980）"]
        );
    }

    #[test]
    fn verdict_labels() {
        assert!(Verdict::Correct.is_correct());
        assert!(!Verdict::Incorrect.is_correct());
        assert_eq!(Verdict::Incorrect.to_string(), "incorrect");
    }
}
