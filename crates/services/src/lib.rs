#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use timeline_core::Clock;
pub use sessions as session;

pub use error::SessionError;

pub use sessions::{
    AnswerBuffer, Phase, QuestionGenerator, QuizLoop, ScoredQuestion, SessionEvent,
    SessionProgress, SessionState, Transition,
};
