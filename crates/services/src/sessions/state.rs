use std::fmt;

use timeline_core::model::{Dataset, EventId, RunLength};

use super::scorer::ScoredQuestion;

/// Where the session is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Menu,
    Quiz,
    Result,
    Done,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Quiz => "quiz",
            Phase::Result => "result",
            Phase::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user action dispatched to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Begin a run from the menu.
    Start(RunLength),
    /// Append an event to the answer.
    Pick(EventId),
    /// Take back the last pick.
    Undo,
    /// Reshuffle the question and clear the answer.
    Reset,
    /// Score the current answer.
    Submit,
    /// Leave the result screen after an incorrect answer.
    Next,
    /// Go back to the menu after a finished run.
    ReturnToMenu,
    /// Replace the dataset; keeps history and user name.
    LoadDataset(Dataset),
    SetUserName(String),
}

impl SessionEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Start(_) => "start",
            SessionEvent::Pick(_) => "pick",
            SessionEvent::Undo => "undo",
            SessionEvent::Reset => "reset",
            SessionEvent::Submit => "submit",
            SessionEvent::Next => "next",
            SessionEvent::ReturnToMenu => "return-to-menu",
            SessionEvent::LoadDataset(_) => "load-dataset",
            SessionEvent::SetUserName(_) => "set-user-name",
        }
    }
}

/// What a handled event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Set when the event scored a question.
    pub scored: Option<ScoredQuestion>,
}

impl Transition {
    #[must_use]
    pub fn stay(phase: Phase) -> Self {
        Self {
            from: phase,
            to: phase,
            scored: None,
        }
    }

    #[must_use]
    pub fn finished_run(&self) -> bool {
        self.to == Phase::Done && self.from != Phase::Done
    }
}
