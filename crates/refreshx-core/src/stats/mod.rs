//! Progress statistics for RefreshX.
//!
//! Consumes break history to produce the completion streak, today's
//! completed/missed counts and goal progress, calories burned, and the
//! per-day details shown by the progress calendar.

mod daily;
mod streak;

pub use daily::{
    calories_for_day, compute_daily_stats, day_detail, focus_area_breakdown, DailySummary,
    DayDetail,
};
pub use streak::{compute_streak, group_by_day};
