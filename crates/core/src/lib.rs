#![forbid(unsafe_code)]

pub mod availability;
pub mod model;
pub mod time;

pub use availability::{AvailabilityError, AvailabilityPolicy};
pub use time::Clock;
