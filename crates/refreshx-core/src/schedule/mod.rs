//! Break scheduling.
//!
//! A [`WorkSchedule`] is derived from the user profile. It resolves the work
//! window, lays out the day's breaks and answers "is today a working day" and
//! "when is the next break". All functions are pure; the current time is always
//! passed in.

mod breaks;
mod weekday;
mod window;

pub use breaks::{break_interval_minutes, compute_break_times, effective_break_count};
pub use weekday::{
    is_working_day, parse_weekday_name, weekday_name, WorkingDays, WEEKDAY_NAMES,
};
pub use window::{is_valid_time_of_day, parse_time_of_day, TimeWindow, MINUTES_PER_DAY};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Work hours and break settings used by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// Raw start of day, `HH:mm` or `HH:mm:ss`
    pub start_of_day: String,
    /// Raw end of day, `HH:mm` or `HH:mm:ss`
    pub end_of_day: String,
    pub working_days: WorkingDays,
    /// Breaks per working day, always >= 1
    pub break_count: u32,
    /// Length of one break; only used for messages and the countdown
    pub break_duration_minutes: u32,
}

/// Answer to "when is my next break?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "at", rename_all = "snake_case")]
pub enum NextBreak {
    /// Today is not one of the configured working days.
    NotWorkingDay,
    /// First break strictly after `now`.
    At(NaiveDateTime),
    /// Every break of the day has already started.
    NoMoreToday,
    /// Work hours could not be parsed.
    Unavailable,
}

impl WorkSchedule {
    pub fn new(
        start_of_day: impl Into<String>,
        end_of_day: impl Into<String>,
        working_days: WorkingDays,
        break_count: i32,
        break_duration_minutes: u32,
    ) -> Self {
        Self {
            start_of_day: start_of_day.into(),
            end_of_day: end_of_day.into(),
            working_days,
            break_count: effective_break_count(break_count),
            break_duration_minutes,
        }
    }

    /// Resolve the configured work window.
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidTime`] when a work-hour string is malformed.
    pub fn window(&self) -> Result<TimeWindow, ScheduleError> {
        TimeWindow::resolve(&self.start_of_day, &self.end_of_day)
    }

    /// Break timestamps for `day`, or an empty list when the work hours
    /// cannot be parsed.
    pub fn break_times(&self, day: NaiveDate) -> Vec<NaiveDateTime> {
        match self.window() {
            Ok(window) => compute_break_times(&window, self.break_count_i32(), day),
            Err(err) => {
                tracing::warn!(
                    start = %self.start_of_day,
                    end = %self.end_of_day,
                    error = %err,
                    "work hours unparseable, no breaks scheduled"
                );
                Vec::new()
            }
        }
    }

    /// Break timestamps for `day`, or empty when `day` is not a working day.
    pub fn active_break_times(&self, day: NaiveDate) -> Vec<NaiveDateTime> {
        if self.is_working_day(day) {
            self.break_times(day)
        } else {
            Vec::new()
        }
    }

    pub fn is_working_day(&self, day: NaiveDate) -> bool {
        is_working_day(&self.working_days, day)
    }

    /// Next break after `now` on `now`'s calendar day.
    pub fn next_break(&self, now: NaiveDateTime) -> NextBreak {
        let today = now.date();
        if !self.is_working_day(today) {
            return NextBreak::NotWorkingDay;
        }
        if self.window().is_err() {
            return NextBreak::Unavailable;
        }
        self.break_times(today)
            .into_iter()
            .find(|t| *t > now)
            .map_or(NextBreak::NoMoreToday, NextBreak::At)
    }

    fn break_count_i32(&self) -> i32 {
        i32::try_from(self.break_count).unwrap_or(i32::MAX)
    }
}
