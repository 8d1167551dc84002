use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use timeline_core::model::{
    Dataset, EventId, History, HistoryEntry, Question, QuizSettings, RunLength, RunSummary,
};

use super::answer::AnswerBuffer;
use super::generator::{QuestionGenerator, reshuffled};
use super::progress::SessionProgress;
use super::scorer::ScoredQuestion;
use super::state::{Phase, SessionEvent, Transition};
use crate::error::SessionError;

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Single owned state of one interactive quiz session.
///
/// Every user action goes through [`SessionState::apply`]. Each transition checks
/// everything it needs before touching any field, so an `Err` leaves the state as it was.
pub struct SessionState {
    dataset: Dataset,
    settings: QuizSettings,
    phase: Phase,
    run_total_questions: u32,
    run_answered: u32,
    total_elapsed_before_run: u64,
    run_history_start: usize,
    question: Option<Question>,
    answer: AnswerBuffer,
    question_started_at: Option<DateTime<Utc>>,
    last_result: Option<ScoredQuestion>,
    history: History,
    user_name: String,
}

impl SessionState {
    /// Create a session in the menu phase for `dataset`.
    #[must_use]
    pub fn new(dataset: Dataset, settings: QuizSettings) -> Self {
        Self {
            dataset,
            settings,
            phase: Phase::Menu,
            run_total_questions: 0,
            run_answered: 0,
            total_elapsed_before_run: 0,
            run_history_start: 0,
            question: None,
            answer: AnswerBuffer::default(),
            question_started_at: None,
            last_result: None,
            history: History::new(),
            user_name: String::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn run_total_questions(&self) -> u32 {
        self.run_total_questions
    }

    #[must_use]
    pub fn run_answered(&self) -> u32 {
        self.run_answered
    }

    /// Cumulative answering time across every run of this session.
    #[must_use]
    pub fn total_elapsed_secs(&self) -> u64 {
        self.history.total_elapsed_secs()
    }

    /// Cumulative time as it was when the current run started.
    #[must_use]
    pub fn total_elapsed_before_run(&self) -> u64 {
        self.total_elapsed_before_run
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn answer(&self) -> &AnswerBuffer {
        &self.answer
    }

    #[must_use]
    pub fn question_started_at(&self) -> Option<DateTime<Utc>> {
        self.question_started_at
    }

    /// Outcome of the most recent submit in this run.
    #[must_use]
    pub fn last_result(&self) -> Option<&ScoredQuestion> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.run_total_questions,
            answered: self.run_answered,
            current: (self.phase == Phase::Quiz).then(|| self.run_answered + 1),
            remaining: self.run_total_questions.saturating_sub(self.run_answered),
            is_complete: self.phase == Phase::Done,
        }
    }

    /// Summary of the entries recorded since the current run started.
    ///
    /// # Errors
    ///
    /// Propagates `RunSummaryError` via `SessionError::Summary`.
    pub fn run_summary(&self) -> Result<RunSummary, SessionError> {
        let entries = self
            .history
            .entries()
            .get(self.run_history_start..)
            .unwrap_or_default();
        Ok(RunSummary::from_entries(entries, self.total_elapsed_secs())?)
    }

    /// Handle one user action.
    ///
    /// `now` stamps question presentation and submission; `rng` drives group choice,
    /// sampling and shuffling.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` for an event the current phase does not accept,
    /// and the event-specific errors documented on [`SessionError`].
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        event: SessionEvent,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Transition, SessionError> {
        let from = self.phase;
        match (from, event) {
            (_, SessionEvent::LoadDataset(dataset)) => {
                self.load_dataset(dataset);
                Ok(self.transition_from(from))
            }
            (_, SessionEvent::SetUserName(name)) => {
                self.user_name = name.trim().to_string();
                Ok(Transition::stay(from))
            }
            (Phase::Menu, SessionEvent::Start(run_length)) => {
                self.start_run(run_length, rng, now)?;
                Ok(self.transition_from(from))
            }
            (Phase::Quiz, SessionEvent::Pick(id)) => {
                self.answer.pick(id)?;
                Ok(Transition::stay(from))
            }
            (Phase::Quiz, SessionEvent::Undo) => {
                self.answer.undo();
                Ok(Transition::stay(from))
            }
            (Phase::Quiz, SessionEvent::Reset) => {
                self.reset_question(rng)?;
                Ok(Transition::stay(from))
            }
            (Phase::Quiz, SessionEvent::Submit) => {
                let scored = self.submit(rng, now)?;
                Ok(Transition {
                    from,
                    to: self.phase,
                    scored: Some(scored),
                })
            }
            (Phase::Result, SessionEvent::Next) => {
                self.advance(rng, now)?;
                Ok(self.transition_from(from))
            }
            (Phase::Done, SessionEvent::ReturnToMenu) => {
                self.clear_run();
                self.phase = Phase::Menu;
                Ok(self.transition_from(from))
            }
            (phase, event) => Err(SessionError::InvalidTransition {
                phase,
                event: event.name(),
            }),
        }
    }

    fn transition_from(&self, from: Phase) -> Transition {
        Transition {
            from,
            to: self.phase,
            scored: None,
        }
    }

    fn start_run<R: Rng + ?Sized>(
        &mut self,
        run_length: RunLength,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let total = self
            .settings
            .resolve_run_length(run_length, self.dataset.len())?;
        let question = QuestionGenerator::new(&self.dataset).next_question(rng)?;

        self.run_total_questions = total;
        self.run_answered = 0;
        self.total_elapsed_before_run = self.history.total_elapsed_secs();
        self.run_history_start = self.history.len();
        self.last_result = None;
        self.present(question, now);
        Ok(())
    }

    fn present(&mut self, question: Question, now: DateTime<Utc>) {
        self.answer = AnswerBuffer::new(question.presented());
        self.question = Some(question);
        self.question_started_at = Some(now);
        self.phase = Phase::Quiz;
    }

    fn reset_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        let Some(question) = self.question.as_mut() else {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                event: "reset",
            });
        };
        let order = reshuffled(question, rng);
        question.set_presented(order)?;
        self.answer = AnswerBuffer::new(question.presented());
        Ok(())
    }

    /// Score the answer, record it, then either wait in `Result` (incorrect) or move on.
    fn submit<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<ScoredQuestion, SessionError> {
        let Some(question) = self.question.as_ref() else {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                event: "submit",
            });
        };
        let presented_at = self.question_started_at.unwrap_or(now);
        let scored = ScoredQuestion::evaluate(question, self.answer.chosen(), presented_at, now);

        let answered = self.run_answered.saturating_add(1);
        let run_complete = answered >= self.run_total_questions;
        let next = if scored.verdict.is_correct() && !run_complete {
            Some(QuestionGenerator::new(&self.dataset).next_question(rng)?)
        } else {
            None
        };

        let entry = HistoryEntry::new(
            question,
            self.answer.chosen(),
            scored.verdict,
            scored.elapsed_secs,
        );
        self.history.record(entry);
        self.run_answered = answered;
        self.last_result = Some(scored.clone());
        self.phase = Phase::Result;

        if scored.verdict.is_correct() {
            match next {
                Some(question) => self.present(question, now),
                None => self.finish(),
            }
        }
        Ok(scored)
    }

    /// Leave `Result`: next question, or `Done` once the run is complete.
    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.run_answered >= self.run_total_questions {
            self.finish();
            return Ok(());
        }
        let question = QuestionGenerator::new(&self.dataset).next_question(rng)?;
        self.present(question, now);
        Ok(())
    }

    fn finish(&mut self) {
        self.question = None;
        self.answer = AnswerBuffer::default();
        self.question_started_at = None;
        self.phase = Phase::Done;
    }

    fn clear_run(&mut self) {
        self.finish();
        self.run_total_questions = 0;
        self.run_answered = 0;
        self.last_result = None;
        self.run_history_start = self.history.len();
    }

    fn load_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.clear_run();
        self.user_name.clear();
        self.total_elapsed_before_run = self.history.total_elapsed_secs();
        self.phase = Phase::Menu;
    }

    /// Event ids in the order shown to the user.
    #[must_use]
    pub fn presented(&self) -> &[EventId] {
        self.question
            .as_ref()
            .map(Question::presented)
            .unwrap_or_default()
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("phase", &self.phase)
            .field("dataset_len", &self.dataset.len())
            .field("run_total_questions", &self.run_total_questions)
            .field("run_answered", &self.run_answered)
            .field("history_len", &self.history.len())
            .field("total_elapsed_secs", &self.history.total_elapsed_secs())
            .field("question_started_at", &self.question_started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
