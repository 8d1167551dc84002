use thiserror::Error;

use crate::model::history::HistoryEntry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunSummaryError {
    #[error("too many entries for a single run: {len}")]
    TooManyEntries { len: usize },
}

/// Aggregate of one completed run, shown on the done screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    answered: u32,
    correct: u32,
    incorrect: u32,
    run_elapsed_secs: u64,
    total_elapsed_secs: u64,
}

impl RunSummary {
    /// Build a summary from the entries recorded during the run.
    ///
    /// `total_elapsed_secs` is the cumulative time across all runs of the session.
    ///
    /// # Errors
    ///
    /// Returns `RunSummaryError::TooManyEntries` if the entry count cannot fit in `u32`.
    pub fn from_entries(
        entries: &[HistoryEntry],
        total_elapsed_secs: u64,
    ) -> Result<Self, RunSummaryError> {
        let mut correct = 0_u32;
        let mut incorrect = 0_u32;
        let mut run_elapsed_secs = 0_u64;

        for entry in entries {
            if entry.verdict().is_correct() {
                correct = correct.saturating_add(1);
            } else {
                incorrect = incorrect.saturating_add(1);
            }
            run_elapsed_secs = run_elapsed_secs.saturating_add(entry.duration_secs());
        }

        let answered = u32::try_from(entries.len())
            .map_err(|_| RunSummaryError::TooManyEntries { len: entries.len() })?;

        Ok(Self {
            answered,
            correct,
            incorrect,
            run_elapsed_secs,
            total_elapsed_secs,
        })
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn run_elapsed_secs(&self) -> u64 {
        self.run_elapsed_secs
    }

    #[must_use]
    pub fn total_elapsed_secs(&self) -> u64 {
        self.total_elapsed_secs
    }
}
