//! Break-time calculator.
//!
//! Splits the work window into `n + 1` equal parts and places a break at each
//! inner boundary, so no break falls exactly at clock-in or clock-out.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use super::window::{TimeWindow, MINUTES_PER_DAY};

/// Clamp a configured break count to the minimum of one break per day.
pub fn effective_break_count(break_count: i32) -> u32 {
    break_count.max(1) as u32
}

/// Minutes between consecutive breaks (integer division by `n + 1`).
pub fn break_interval_minutes(window: &TimeWindow, break_count: i32) -> u32 {
    window.total_minutes() / (effective_break_count(break_count) + 1)
}

/// Compute the ordered break timestamps for `reference_day`.
///
/// Always returns exactly `max(1, break_count)` entries. For overnight windows
/// any break whose offset passes midnight lands on the following day. A window
/// too short for the requested count yields repeated timestamps; that is
/// accepted, not an error.
pub fn compute_break_times(
    window: &TimeWindow,
    break_count: i32,
    reference_day: NaiveDate,
) -> Vec<NaiveDateTime> {
    let count = effective_break_count(break_count);
    let interval = break_interval_minutes(window, break_count);

    let times: Vec<NaiveDateTime> = (1..=count)
        .map(|i| {
            let offset = window.start_minutes + interval * i;
            let minute = offset % MINUTES_PER_DAY;
            let day = if window.is_overnight && offset >= MINUTES_PER_DAY {
                reference_day
                    .checked_add_days(Days::new(1))
                    .unwrap_or(reference_day)
            } else {
                reference_day
            };
            day.and_time(time_from_minute(minute))
        })
        .collect();

    tracing::debug!(
        start = window.start_minutes,
        end = window.end_minutes,
        overnight = window.is_overnight,
        interval,
        count,
        "computed break times"
    );

    times
}

fn time_from_minute(minute: u32) -> NaiveTime {
    // minute < 1440 by construction
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or(NaiveTime::MIN)
}
