//! Property tests for break-time layout, reminder filtering and streaks.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;
use refreshx_core::reminders::plan_reminders;
use refreshx_core::schedule::{compute_break_times, TimeWindow, MINUTES_PER_DAY};
use refreshx_core::stats::compute_streak;
use refreshx_core::BreakEvent;
use uuid::Uuid;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
}

fn window(start: u32, end: u32) -> TimeWindow {
    TimeWindow::from_times(
        NaiveTime::from_hms_opt(start / 60, start % 60, 0).unwrap(),
        NaiveTime::from_hms_opt(end / 60, end % 60, 0).unwrap(),
    )
}

fn start_instant(w: &TimeWindow) -> NaiveDateTime {
    day().and_hms_opt(w.start_minutes / 60, w.start_minutes % 60, 0).unwrap()
}

proptest! {
    #[test]
    fn count_is_max_one_n(start in 0u32..MINUTES_PER_DAY, end in 0u32..MINUTES_PER_DAY, n in -5i32..60) {
        let times = compute_break_times(&window(start, end), n, day());
        prop_assert_eq!(times.len() as i32, n.max(1));
    }

    #[test]
    fn strictly_increasing_when_window_fits(start in 0u32..MINUTES_PER_DAY, end in 0u32..MINUTES_PER_DAY, n in 1i32..60) {
        let w = window(start, end);
        prop_assume!(w.total_minutes() >= n as u32 + 1);
        let times = compute_break_times(&w, n, day());
        for pair in times.windows(2) {
            prop_assert!(pair[0] < pair[1], "{:?} !< {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn breaks_fall_strictly_inside_window(start in 0u32..MINUTES_PER_DAY, end in 0u32..MINUTES_PER_DAY, n in 1i32..60) {
        let w = window(start, end);
        prop_assume!(w.total_minutes() >= n as u32 + 1);
        let open = start_instant(&w);
        let close = open + Duration::minutes(i64::from(w.total_minutes()));
        for t in compute_break_times(&w, n, day()) {
            prop_assert!(t > open && t < close, "{t} outside ({open}, {close})");
        }
    }

    #[test]
    fn computation_is_idempotent(start in 0u32..MINUTES_PER_DAY, end in 0u32..MINUTES_PER_DAY, n in -3i32..40) {
        let w = window(start, end);
        prop_assert_eq!(compute_break_times(&w, n, day()), compute_break_times(&w, n, day()));
    }

    #[test]
    fn no_reminders_after_last_break(start in 0u32..MINUTES_PER_DAY, end in 0u32..MINUTES_PER_DAY, n in 1i32..30, after in 1i64..600, lead in 0i64..30) {
        let times = compute_break_times(&window(start, end), n, day());
        let last = *times.last().unwrap();
        let now = last + Duration::minutes(after);
        let plan = plan_reminders(&times, Duration::minutes(lead), now, |_| String::new());
        prop_assert!(plan.is_empty());
    }

    #[test]
    fn streak_never_crosses_a_gap(gap in 0i64..10, extra in 0i64..10, offset in 0i64..10) {
        // completed breaks on every day except `gap` days back
        let today = day();
        let events: Vec<BreakEvent> = (0..gap + extra + 1)
            .filter(|back| *back != gap)
            .map(|back| {
                let t = (today - Duration::days(back)).and_hms_opt(12, 0, 0).unwrap().and_utc();
                let mut e = BreakEvent::new(Uuid::nil(), t);
                e.completed = true;
                e
            })
            .collect();

        // counting from any day at or after the gap stops before it
        let from = today - Duration::days(gap.min(offset));
        let streak = compute_streak(&events, from, &chrono::Utc);
        let distance_to_gap = (from - (today - Duration::days(gap))).num_days();
        prop_assert_eq!(i64::from(streak), distance_to_gap);
    }
}
