//! Shared error types for the services crate.

use thiserror::Error;

use timeline_core::model::{EventId, QuestionError, RunSummaryError, SettingsError};

use crate::sessions::Phase;

/// Errors emitted by the quiz session state machine.
///
/// A transition that returns an error leaves the session unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("run count {requested} is outside 1..={max}")]
    InvalidRunCount { requested: u32, max: u32 },
    #[error("no group has enough events for a question")]
    NoEligibleGroup,
    #[error("{event} is not allowed in the {phase} phase")]
    InvalidTransition { phase: Phase, event: &'static str },
    #[error("event {0} is not among the remaining choices")]
    NotRemaining(EventId),
    #[error(transparent)]
    Settings(SettingsError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Summary(#[from] RunSummaryError),
}

impl From<SettingsError> for SessionError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::InvalidRunCount { requested, max } => {
                Self::InvalidRunCount { requested, max }
            }
            other => Self::Settings(other),
        }
    }
}
