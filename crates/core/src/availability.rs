use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AvailabilityError {
    #[error("the quiz is closed until {opens_at_hour:02}:00")]
    Closed { opens_at_hour: u32 },

    #[error("the quiz was available until {last_day}")]
    Expired { last_day: NaiveDate },

    #[error("invalid UTC offset: {hours} hours")]
    InvalidOffset { hours: i32 },

    #[error("closed hours must be within 0..=24, got {from}..{until}")]
    InvalidHours { from: u32, until: u32 },
}

/// Operating window checked once before a session starts.
///
/// Hours are evaluated in the policy's own UTC offset, not the host's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityPolicy {
    offset: FixedOffset,
    closed_from_hour: u32,
    closed_until_hour: u32,
    expires_on: Option<NaiveDate>,
}

impl AvailabilityPolicy {
    /// # Errors
    ///
    /// Returns `AvailabilityError::InvalidOffset` for offsets outside ±23 hours.
    /// Returns `AvailabilityError::InvalidHours` for hours past 24.
    pub fn new(
        utc_offset_hours: i32,
        closed_from_hour: u32,
        closed_until_hour: u32,
        expires_on: Option<NaiveDate>,
    ) -> Result<Self, AvailabilityError> {
        let offset = FixedOffset::east_opt(utc_offset_hours.saturating_mul(3600)).ok_or(
            AvailabilityError::InvalidOffset {
                hours: utc_offset_hours,
            },
        )?;
        if closed_from_hour > 24 || closed_until_hour > 24 {
            return Err(AvailabilityError::InvalidHours {
                from: closed_from_hour,
                until: closed_until_hour,
            });
        }
        Ok(Self {
            offset,
            closed_from_hour,
            closed_until_hour,
            expires_on,
        })
    }

    /// A policy that never blocks.
    #[must_use]
    pub fn always_open() -> Self {
        Self {
            offset: Utc.fix(),
            closed_from_hour: 0,
            closed_until_hour: 0,
            expires_on: None,
        }
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// `now` in the policy's offset.
    #[must_use]
    pub fn local(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    /// Check whether the quiz may start at `now`.
    ///
    /// The closed window is `[from, until)`; a window with `from > until` wraps past midnight.
    ///
    /// # Errors
    ///
    /// Returns `AvailabilityError::Expired` once the local date is after `expires_on`.
    /// Returns `AvailabilityError::Closed` inside the closed window.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), AvailabilityError> {
        let local = self.local(now);
        if let Some(last_day) = self.expires_on {
            if local.date_naive() > last_day {
                return Err(AvailabilityError::Expired { last_day });
            }
        }

        let hour = local.hour();
        let (from, until) = (self.closed_from_hour, self.closed_until_hour);
        let closed = if from <= until {
            (from..until).contains(&hour)
        } else {
            hour >= from || hour < until
        };
        if closed {
            return Err(AvailabilityError::Closed {
                opens_at_hour: until % 24,
            });
        }
        Ok(())
    }
}

impl Default for AvailabilityPolicy {
    /// UTC+9, closed from midnight to 06:00, no expiry.
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(9 * 3600).unwrap_or_else(|| Utc.fix()),
            closed_from_hour: 0,
            closed_until_hour: 6,
            expires_on: None,
        }
    }
}
