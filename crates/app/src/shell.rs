//! Line-oriented front end: reads commands, dispatches them, and re-renders.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use services::{QuizLoop, SessionError, SessionEvent, Transition};
use storage::StorageError;
use storage::export::{HistoryExport, export_history};
use timeline_core::AvailabilityPolicy;
use timeline_core::model::{RunLength, format_duration};

use crate::command::{Command, CommandError, HELP};
use crate::vm;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShellError {
    #[error("there is no remaining event number {0}")]
    NoSuchChoice(usize),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Whether the read loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    quiz: QuizLoop,
    policy: AvailabilityPolicy,
    export_dir: PathBuf,
}

impl Shell {
    #[must_use]
    pub fn new(quiz: QuizLoop, policy: AvailabilityPolicy, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            quiz,
            policy,
            export_dir: export_dir.into(),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizLoop {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut QuizLoop {
        &mut self.quiz
    }

    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Run one command, writing any feedback to `out`.
    ///
    /// # Errors
    ///
    /// Returns the session or storage error that rejected the command, or an I/O error
    /// from writing feedback.
    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, ShellError> {
        match command {
            Command::Start(n) => {
                let run_length = if self.quiz.state().settings().run_presets().contains(&n) {
                    RunLength::Preset(n)
                } else {
                    RunLength::Custom(n)
                };
                self.dispatch(SessionEvent::Start(run_length), out)?;
            }
            Command::Custom(n) => {
                self.dispatch(SessionEvent::Start(RunLength::Custom(n)), out)?;
            }
            Command::Pick(position) => {
                let id = position
                    .checked_sub(1)
                    .and_then(|idx| self.quiz.state().answer().remaining().get(idx).copied())
                    .ok_or(ShellError::NoSuchChoice(position))?;
                self.dispatch(SessionEvent::Pick(id), out)?;
            }
            Command::Undo => {
                self.dispatch(SessionEvent::Undo, out)?;
            }
            Command::Reset => {
                self.dispatch(SessionEvent::Reset, out)?;
            }
            Command::Submit => {
                self.dispatch(SessionEvent::Submit, out)?;
            }
            Command::Next => {
                self.dispatch(SessionEvent::Next, out)?;
            }
            Command::Menu => {
                self.dispatch(SessionEvent::ReturnToMenu, out)?;
            }
            Command::Name(name) => {
                self.dispatch(SessionEvent::SetUserName(name), out)?;
                writeln!(out, "name set to {}", self.quiz.state().user_name())?;
            }
            Command::Load(path) => {
                let dataset = storage::load_dataset(&path)?;
                info!(path = %path.display(), rows = dataset.len(), "dataset replaced");
                self.dispatch(SessionEvent::LoadDataset(dataset), out)?;
            }
            Command::Export => {
                let export = self.export()?;
                let path = export.write_to(&self.export_dir)?;
                writeln!(out, "history saved to {}", path.display())?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Render the session history as CSV, stamped with the policy's local time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the CSV cannot be produced.
    pub fn export(&self) -> Result<HistoryExport, StorageError> {
        let state = self.quiz.state();
        export_history(
            state.user_name(),
            state.history().entries(),
            state.total_elapsed_secs(),
            self.policy.local(self.quiz.clock().now()),
        )
    }

    fn dispatch<W: Write>(&mut self, event: SessionEvent, out: &mut W) -> Result<Transition, ShellError> {
        let transition = self.quiz.dispatch(event)?;
        // A correct answer moves straight on, so the verdict is only visible here.
        if let Some(scored) = &transition.scored {
            if scored.verdict.is_correct() {
                writeln!(out, "Correct! ({})", format_duration(scored.elapsed_secs))?;
            }
        }
        Ok(transition)
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// Rejected commands are reported on `out` and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Io` if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), ShellError> {
        write!(out, "{}> ", vm::render(self.quiz.state()))?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let outcome = line
                .parse::<Command>()
                .map_err(ShellError::from)
                .and_then(|command| self.handle(command, out));
            match outcome {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(ShellError::Io(err)) => return Err(ShellError::Io(err)),
                Err(err) => {
                    warn!(error = %err, phase = %self.quiz.state().phase(), "command rejected");
                    writeln!(out, "! {err}")?;
                }
            }
            write!(out, "\n{}> ", vm::render(self.quiz.state()))?;
            out.flush()?;
        }
        Ok(())
    }
}
