//! # RefreshX Core Library
//!
//! Break scheduling for desk workers: the app spreads a configured number of
//! breaks across the work day, reminds the user shortly before each one,
//! walks them through an exercise routine and reports progress.
//!
//! The CLI binary and any GUI are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Schedule**: pure calculators for the work window, break times and the
//!   weekday gate
//! - **Reminders**: lead-time notifications behind a [`Notifier`] seam
//! - **Stats**: streaks, daily progress and calorie totals
//! - **Session**: tick-driven state machine for a running break
//! - **Storage**: TOML configuration and a SQLite [`BreakStore`]
//!
//! ## Key Components
//!
//! - [`WorkSchedule`]: the scheduler's view of a profile
//! - [`BreakPlanner`]: profile and clock bound facade
//! - [`Database`]: break history and exercise library
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod exercise;
pub mod planner;
pub mod profile;
pub mod reminders;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ScheduleError, ValidationError};
pub use events::BreakEvent;
pub use exercise::{calories_burned, ExerciseSpec, FocusArea};
pub use planner::BreakPlanner;
pub use profile::{BmiCategory, UserProfile};
pub use reminders::{MemoryNotifier, Notification, Notifier, PlannedReminder, ReminderSettings};
pub use schedule::{NextBreak, TimeWindow, WorkSchedule, WorkingDays};
pub use session::{BreakSession, SessionState, SessionUpdate};
pub use stats::{DailySummary, DayDetail};
pub use storage::{BreakStore, Config, Database};
