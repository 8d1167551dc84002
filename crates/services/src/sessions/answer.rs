use timeline_core::model::EventId;

use crate::error::SessionError;

/// The user's partial ordering and the events still left to place.
///
/// Both halves live in one value so every operation moves an event between them;
/// together they always hold exactly the presented events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    chosen: Vec<EventId>,
    remaining: Vec<EventId>,
}

impl AnswerBuffer {
    #[must_use]
    pub fn new(presented: &[EventId]) -> Self {
        Self {
            chosen: Vec::with_capacity(presented.len()),
            remaining: presented.to_vec(),
        }
    }

    /// Events placed so far, in the order they were picked.
    #[must_use]
    pub fn chosen(&self) -> &[EventId] {
        &self.chosen
    }

    #[must_use]
    pub fn remaining(&self) -> &[EventId] {
        &self.remaining
    }

    /// True once every presented event has been placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty() && !self.chosen.is_empty()
    }

    /// Move `id` from the remaining events to the tail of the answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRemaining` if `id` is not waiting to be placed.
    pub fn pick(&mut self, id: EventId) -> Result<(), SessionError> {
        let idx = self
            .remaining
            .iter()
            .position(|candidate| *candidate == id)
            .ok_or(SessionError::NotRemaining(id))?;
        let picked = self.remaining.remove(idx);
        self.chosen.push(picked);
        Ok(())
    }

    /// Return the most recently placed event to the end of the remaining events.
    pub fn undo(&mut self) -> Option<EventId> {
        let last = self.chosen.pop()?;
        self.remaining.push(last);
        Some(last)
    }
}
