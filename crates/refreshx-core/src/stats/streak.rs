//! Completion streaks over calendar days.

use chrono::{NaiveDate, TimeZone};
use std::collections::{BTreeMap, HashSet};

use crate::events::BreakEvent;

/// Group events by their local calendar day in `tz`.
///
/// Events keep their input order within a day.
pub fn group_by_day<Tz: TimeZone>(
    events: &[BreakEvent],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<BreakEvent>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<BreakEvent>> = BTreeMap::new();
    for ev in events {
        by_day.entry(ev.local_date(tz)).or_default().push(ev.clone());
    }
    by_day
}

/// Consecutive days, ending at `today`, with at least one completed break.
///
/// The walk stops at the first day without a completed break, `today`
/// included. A day with no breaks at all stops it the same way.
pub fn compute_streak<Tz: TimeZone>(events: &[BreakEvent], today: NaiveDate, tz: &Tz) -> u32 {
    let completed_days: HashSet<NaiveDate> = events
        .iter()
        .filter(|ev| ev.completed)
        .map(|ev| ev.local_date(tz))
        .collect();

    let mut streak = 0;
    let mut day = today;
    while completed_days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
