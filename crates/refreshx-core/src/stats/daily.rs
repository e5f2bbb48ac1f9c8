//! Today's progress and per-day activity details.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::events::BreakEvent;
use crate::exercise::{ExerciseSpec, FocusArea};
use crate::schedule::WorkSchedule;

/// Progress summary for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub completed_count: u32,
    pub missed_count: u32,
    /// `completed / break_count`; may exceed 1.0 when the user over-completes
    pub goal_progress: f64,
    pub calories_burned: f64,
}

/// Completed and missed counts plus goal progress for `now`'s day.
///
/// `today_events` must already be limited to that day. A break counts as
/// missed when its slot is at or before `now` and there are fewer completed
/// breaks than past slots. Off-schedule breaks still count as completed. On a
/// day off nothing is ever missed. `calories_burned` is left at zero, see
/// [`calories_for_day`].
pub fn compute_daily_stats(
    today_events: &[BreakEvent],
    schedule: &WorkSchedule,
    now: NaiveDateTime,
) -> DailySummary {
    let completed_count = today_events.iter().filter(|e| e.completed).count() as u32;

    let missed_count = if schedule.is_working_day(now.date()) {
        let expected_past = schedule
            .break_times(now.date())
            .iter()
            .filter(|t| **t <= now)
            .count() as u32;
        expected_past.saturating_sub(completed_count)
    } else {
        0
    };

    let goal_progress = f64::from(completed_count) / f64::from(schedule.break_count.max(1));

    DailySummary {
        completed_count,
        missed_count,
        goal_progress,
        calories_burned: 0.0,
    }
}

/// Calories burned over the completed breaks that recorded an exercise.
///
/// Breaks whose exercise is not in `exercises` contribute nothing.
pub fn calories_for_day(
    events: &[BreakEvent],
    exercises: &HashMap<String, ExerciseSpec>,
    body_weight_kg: Option<f64>,
) -> f64 {
    if body_weight_kg.is_none() {
        return 0.0;
    }
    events
        .iter()
        .filter(|e| e.completed)
        .filter_map(|e| e.exercise_id.as_ref())
        .filter_map(|id| exercises.get(id))
        .map(|ex| ex.calories_burned(body_weight_kg))
        .sum()
}

/// How many of the given exercises target each focus area.
pub fn focus_area_breakdown<'a, I>(exercises: I) -> BTreeMap<FocusArea, u32>
where
    I: IntoIterator<Item = &'a ExerciseSpec>,
{
    let mut counts = BTreeMap::new();
    for ex in exercises {
        *counts.entry(ex.focus_area).or_insert(0) += 1;
    }
    counts
}

/// Everything the progress calendar shows for one selected day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayDetail {
    pub date: Option<NaiveDate>,
    pub breaks: Vec<BreakEvent>,
    /// Exercises referenced by the day's breaks, one entry per distinct id
    pub exercises: Vec<ExerciseSpec>,
    pub calories_burned: f64,
    pub by_focus_area: BTreeMap<FocusArea, u32>,
}

/// Collect the breaks of `date` and resolve their exercises.
pub fn day_detail<Tz: TimeZone>(
    date: NaiveDate,
    events: &[BreakEvent],
    exercises: &HashMap<String, ExerciseSpec>,
    body_weight_kg: Option<f64>,
    tz: &Tz,
) -> DayDetail {
    let breaks: Vec<BreakEvent> = events
        .iter()
        .filter(|e| e.local_date(tz) == date)
        .cloned()
        .collect();

    let mut seen = Vec::new();
    let mut day_exercises = Vec::new();
    for id in breaks.iter().filter_map(|b| b.exercise_id.as_ref()) {
        if seen.contains(id) {
            continue;
        }
        seen.push(id.clone());
        if let Some(ex) = exercises.get(id) {
            day_exercises.push(ex.clone());
        }
    }

    DayDetail {
        date: Some(date),
        calories_burned: calories_for_day(&breaks, exercises, body_weight_kg),
        by_focus_area: focus_area_breakdown(&day_exercises),
        exercises: day_exercises,
        breaks,
    }
}
