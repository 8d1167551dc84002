use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use timeline_core::{AvailabilityError, AvailabilityPolicy};

/// `RUST_LOG` fallback when the variable is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "timeline_quiz=info,services=info,storage=info";

#[derive(Debug, Parser)]
#[command(
    name = "timeline-quiz",
    version,
    about = "Put four historical events in chronological order"
)]
pub struct Cli {
    /// CSV with `event` and `sortKey` columns (UTF-8 or Shift_JIS)
    #[arg(long, env = "TIMELINE_QUIZ_FILE")]
    pub file: PathBuf,

    /// Name used as the prefix of exported history files
    #[arg(long, env = "TIMELINE_QUIZ_USER")]
    pub user: Option<String>,

    /// Seed for reproducible question order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory that `export` writes into
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// UTC offset the opening hours are evaluated in
    #[arg(long, default_value_t = 9, allow_negative_numbers = true)]
    pub utc_offset_hours: i32,

    /// First closed hour (inclusive)
    #[arg(long, default_value_t = 0)]
    pub closed_from: u32,

    /// First open hour after the closed window
    #[arg(long, default_value_t = 6)]
    pub closed_until: u32,

    /// Last day the quiz may be started (YYYY-MM-DD)
    #[arg(long)]
    pub expires_on: Option<NaiveDate>,

    /// Skip the opening-hours and expiry checks
    #[arg(long)]
    pub ignore_availability: bool,
}

impl Cli {
    /// Availability gate described by the flags.
    ///
    /// # Errors
    ///
    /// Returns `AvailabilityError::InvalidOffset` or `AvailabilityError::InvalidHours`
    /// for out-of-range values.
    pub fn availability(&self) -> Result<AvailabilityPolicy, AvailabilityError> {
        // Keep the offset: it also stamps export filenames.
        if self.ignore_availability {
            return AvailabilityPolicy::new(self.utc_offset_hours, 0, 0, None);
        }
        AvailabilityPolicy::new(
            self.utc_offset_hours,
            self.closed_from,
            self.closed_until,
            self.expires_on,
        )
    }
}
