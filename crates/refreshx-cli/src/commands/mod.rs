pub mod breaks;
pub mod config;
pub mod exercise;
pub mod profile;
pub mod reminders;
pub mod routine;
pub mod schedule;
pub mod stats;

use refreshx_core::{BreakPlanner, Config, SystemClock};
use serde::Serialize;
use uuid::Uuid;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// `--user` if given, else the local user from config.
pub fn resolve_user(config: &Config, user: Option<Uuid>) -> Uuid {
    user.unwrap_or(config.user_id)
}

pub fn planner(config: &Config) -> BreakPlanner<SystemClock> {
    BreakPlanner::new(config.profile.clone(), SystemClock).with_reminders(config.reminders.clone())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Result<chrono::NaiveDate, refreshx_core::ScheduleError> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| refreshx_core::ScheduleError::InvalidDate { raw: raw.into() })
}
