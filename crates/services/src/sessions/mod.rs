mod answer;
mod generator;
mod progress;
mod scorer;
mod service;
mod state;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use answer::AnswerBuffer;
pub use generator::{QuestionGenerator, reshuffled};
pub use progress::SessionProgress;
pub use scorer::{ScoredQuestion, score};
pub use service::SessionState;
pub use state::{Phase, SessionEvent, Transition};
pub use workflow::QuizLoop;
