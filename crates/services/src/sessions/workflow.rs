use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use timeline_core::model::{Dataset, QuizSettings};

use super::service::SessionState;
use super::state::{SessionEvent, Transition};
use crate::Clock;
use crate::error::SessionError;

/// Drives a [`SessionState`] with a clock and a random source.
///
/// The shell dispatches user actions here and re-renders from [`QuizLoop::state`] afterwards.
pub struct QuizLoop {
    clock: Clock,
    rng: StdRng,
    state: SessionState,
}

impl QuizLoop {
    /// New session seeded from OS entropy.
    #[must_use]
    pub fn new(clock: Clock, dataset: Dataset, settings: QuizSettings) -> Self {
        Self::with_rng(clock, StdRng::from_os_rng(), dataset, settings)
    }

    /// New session with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(clock: Clock, seed: u64, dataset: Dataset, settings: QuizSettings) -> Self {
        Self::with_rng(clock, StdRng::seed_from_u64(seed), dataset, settings)
    }

    fn with_rng(clock: Clock, rng: StdRng, dataset: Dataset, settings: QuizSettings) -> Self {
        Self {
            clock,
            rng,
            state: SessionState::new(dataset, settings),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable access to the clock, so tests can advance a fixed clock between events.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Apply one user action at the current clock time.
    ///
    /// # Errors
    ///
    /// Returns the `SessionError` produced by the transition; the state is unchanged in that case.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<Transition, SessionError> {
        let name = event.name();
        let now = self.clock.now();
        let transition = self.state.apply(event, &mut self.rng, now).inspect_err(|err| {
            debug!(event = name, phase = %self.state.phase(), error = %err, "event rejected");
        })?;

        debug!(event = name, from = %transition.from, to = %transition.to, "session transition");
        if let Some(scored) = &transition.scored {
            info!(
                verdict = %scored.verdict,
                elapsed_secs = scored.elapsed_secs,
                answered = self.state.run_answered(),
                total = self.state.run_total_questions(),
                "question scored"
            );
        }
        if transition.finished_run() {
            info!(
                answered = self.state.run_answered(),
                total_elapsed_secs = self.state.total_elapsed_secs(),
                "run finished"
            );
        }
        Ok(transition)
    }
}
