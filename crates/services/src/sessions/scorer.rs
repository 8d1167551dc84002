use chrono::{DateTime, Utc};

use timeline_core::model::{EventId, Question, Verdict};
use timeline_core::time::elapsed_secs;

/// `Correct` iff `answer` lists exactly the question's events in ascending order.
///
/// There is no partial credit: a short or reordered answer is `Incorrect`.
#[must_use]
pub fn score(question: &Question, answer: &[EventId]) -> Verdict {
    if answer.iter().copied().eq(question.correct_order()) {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Outcome of the last submitted question, kept for the result screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredQuestion {
    pub verdict: Verdict,
    pub elapsed_secs: u64,
    /// The submitted events, in submitted order.
    pub chosen: Vec<String>,
    /// The correct order as `event（key）` labels.
    pub correct_labelled: Vec<String>,
}

impl ScoredQuestion {
    /// Score `answer` and time it from presentation to submission.
    #[must_use]
    pub fn evaluate(
        question: &Question,
        answer: &[EventId],
        presented_at: DateTime<Utc>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let chosen = answer
            .iter()
            .filter_map(|id| question.item(*id))
            .map(|record| record.event().to_string())
            .collect();
        Self {
            verdict: score(question, answer),
            elapsed_secs: elapsed_secs(presented_at, submitted_at),
            chosen,
            correct_labelled: question.labelled_answer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use timeline_core::model::{EventRecord, GroupId, SortKey};
    use timeline_core::time::fixed_now;

    // A(1900), B(1920), C(1950), D(1980) presented as D, B, A, C.
    fn question() -> Question {
        let records = [("A", "1900"), ("B", "1920"), ("C", "1950"), ("D", "1980")]
            .iter()
            .enumerate()
            .map(|(i, (event, key))| {
                EventRecord::new(
                    EventId::new(u32::try_from(i).unwrap()),
                    *event,
                    SortKey::parse(*key),
                    GroupId::new(1),
                )
            })
            .collect();
        Question::new(GroupId::new(1), records, ids(&[3, 1, 0, 2])).unwrap()
    }

    fn ids(raw: &[u32]) -> Vec<EventId> {
        raw.iter().copied().map(EventId::new).collect()
    }

    #[test]
    fn ascending_order_is_correct() {
        assert_eq!(score(&question(), &ids(&[0, 1, 2, 3])), Verdict::Correct);
    }

    #[test]
    fn swapped_pair_is_incorrect() {
        assert_eq!(score(&question(), &ids(&[0, 2, 1, 3])), Verdict::Incorrect);
    }

    #[test]
    fn partial_or_empty_answer_is_incorrect() {
        assert_eq!(score(&question(), &ids(&[0, 1, 2])), Verdict::Incorrect);
        assert_eq!(score(&question(), &[]), Verdict::Incorrect);
    }

    #[test]
    fn evaluate_floors_elapsed_time() {
        let start = fixed_now();
        let scored = ScoredQuestion::evaluate(
            &question(),
            &ids(&[3, 2, 1, 0]),
            start,
            start + Duration::milliseconds(12_900),
        );
        assert_eq!(scored.verdict, Verdict::Incorrect);
        assert_eq!(scored.elapsed_secs, 12);
        assert_eq!(scored.chosen, vec!["D", "C", "B", "A"]);
        assert_eq!(
            scored.correct_labelled,
            vec!["A（1900）", "B（1920）", "C（1950）", "D（1980）"]
        );
    }
}
