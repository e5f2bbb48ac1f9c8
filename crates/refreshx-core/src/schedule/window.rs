//! Work-window resolution.
//!
//! Turns the raw `job_start` / `job_end` strings of a profile into
//! minute-of-day values. An end time that is not strictly after the start
//! time is an overnight shift, never an error.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Accepted time-of-day formats, most specific first.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// A resolved work window in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the work day, 0..=1439
    pub start_minutes: u32,
    /// End of the work day, 0..=1439
    pub end_minutes: u32,
    /// `end_minutes <= start_minutes`: the window spans midnight
    pub is_overnight: bool,
}

impl TimeWindow {
    /// Resolve raw start/end strings (`HH:mm` or `HH:mm:ss`).
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidTime`] for the first input that matches
    /// neither format. Callers treat this as "no schedule available".
    pub fn resolve(start_raw: &str, end_raw: &str) -> Result<Self, ScheduleError> {
        let start = parse_time_of_day(start_raw)?;
        let end = parse_time_of_day(end_raw)?;
        Ok(Self::from_times(start, end))
    }

    /// Build a window from already-parsed times. Seconds are dropped.
    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Self {
        let start_minutes = minute_of_day(start);
        let end_minutes = minute_of_day(end);
        Self {
            start_minutes,
            end_minutes,
            is_overnight: end_minutes <= start_minutes,
        }
    }

    /// Length of the work window in minutes.
    ///
    /// Overnight windows wrap through midnight, so a window whose start equals
    /// its end covers the full 1440 minutes.
    pub fn total_minutes(&self) -> u32 {
        if self.is_overnight {
            (MINUTES_PER_DAY - self.start_minutes) + self.end_minutes
        } else {
            self.end_minutes - self.start_minutes
        }
    }
}

/// Parse a wall-clock time of day, trying `HH:mm:ss` before `HH:mm`.
///
/// # Errors
/// Returns [`ScheduleError::InvalidTime`] when neither format matches.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, ScheduleError> {
    let trimmed = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ScheduleError::InvalidTime {
            raw: raw.to_string(),
        })
}

/// True when `raw` is a time string the resolver accepts.
pub fn is_valid_time_of_day(raw: &str) -> bool {
    parse_time_of_day(raw).is_ok()
}

fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}
