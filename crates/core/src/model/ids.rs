use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single event row, equal to its 0-based position in the source table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(u32);

impl EventId {
    /// Creates a new `EventId`
    #[must_use]
    pub fn new(position: u32) -> Self {
        Self(position)
    }

    /// Returns the underlying row position
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Identifier of a fixed-size bucket of consecutive rows.
///
/// Numbering starts at 1 and renders as `group-<n>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(u32);

impl GroupId {
    /// Creates a new `GroupId` from its 1-based number.
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Group that contains the row at `position` for buckets of `group_size` rows.
    #[must_use]
    pub fn for_position(position: usize, group_size: usize) -> Self {
        let number = position / group_size.max(1) + 1;
        Self(u32::try_from(number).unwrap_or(u32::MAX))
    }

    /// Returns the 1-based group number
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}
