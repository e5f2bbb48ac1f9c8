//! Profile-bound facade over the schedule, reminder and stats calculators.
//!
//! [`BreakPlanner`] holds the profile and a [`Clock`] so callers never pass
//! "now" around. Local days and wall-clock values come from the clock's
//! timezone, so every history query groups breaks the same way.

use chrono::{Days, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

use crate::clock::Clock;
use crate::error::Result;
use crate::events::BreakEvent;
use crate::exercise::ExerciseSpec;
use crate::profile::UserProfile;
use crate::reminders::{build_notifications, schedule_break_notifications, Notification, Notifier, ReminderSettings};
use crate::schedule::{NextBreak, WorkSchedule};
use crate::stats::{
    self, calories_for_day, compute_daily_stats, compute_streak, group_by_day, DailySummary,
    DayDetail,
};

pub struct BreakPlanner<C: Clock> {
    profile: UserProfile,
    schedule: WorkSchedule,
    reminders: ReminderSettings,
    clock: C,
}

impl<C: Clock> BreakPlanner<C> {
    pub fn new(profile: UserProfile, clock: C) -> Self {
        let schedule = profile.work_schedule();
        Self {
            profile,
            schedule,
            reminders: ReminderSettings::default(),
            clock,
        }
    }

    pub fn with_reminders(mut self, reminders: ReminderSettings) -> Self {
        self.reminders = reminders;
        self
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn schedule(&self) -> &WorkSchedule {
        &self.schedule
    }

    /// Local wall-clock now.
    pub fn now_local(&self) -> NaiveDateTime {
        self.clock.now().naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.now_local().date()
    }

    /// Today's break times; empty on a day off.
    pub fn today_breaks(&self) -> Vec<NaiveDateTime> {
        self.schedule.active_break_times(self.today())
    }

    pub fn next_break(&self) -> NextBreak {
        self.schedule.next_break(self.now_local())
    }

    /// Reminders still to fire today.
    pub fn plan_notifications(&self) -> Vec<Notification> {
        build_notifications(&self.schedule, &self.reminders, self.now_local())
    }

    /// Replace the notifier's pending reminders with today's.
    ///
    /// # Errors
    /// Propagates notifier failures.
    pub fn schedule_notifications<N: Notifier + ?Sized>(&self, notifier: &mut N) -> Result<usize> {
        schedule_break_notifications(&self.schedule, &self.reminders, self.now_local(), notifier)
    }

    /// Progress for today out of the user's full history.
    pub fn daily_summary(
        &self,
        events: &[BreakEvent],
        exercises: &HashMap<String, ExerciseSpec>,
    ) -> DailySummary {
        let now = self.clock.now();
        let tz = now.timezone();
        let today = now.date_naive();
        let today_events: Vec<BreakEvent> = events
            .iter()
            .filter(|e| e.local_date(&tz) == today)
            .cloned()
            .collect();

        let mut summary = compute_daily_stats(&today_events, &self.schedule, now.naive_local());
        summary.calories_burned = calories_for_day(&today_events, exercises, self.profile.weight);
        summary
    }

    pub fn streak(&self, events: &[BreakEvent]) -> u32 {
        let now = self.clock.now();
        compute_streak(events, now.date_naive(), &now.timezone())
    }

    /// Breaks and exercises of one local day.
    pub fn day_detail(
        &self,
        date: NaiveDate,
        events: &[BreakEvent],
        exercises: &HashMap<String, ExerciseSpec>,
    ) -> DayDetail {
        stats::day_detail(date, events, exercises, self.profile.weight, &self.clock.timezone())
    }

    /// History grouped by local day over the last `days` days, today included.
    ///
    /// A span reaching past the earliest representable date covers all history.
    pub fn calendar(
        &self,
        events: &[BreakEvent],
        days: u32,
    ) -> BTreeMap<NaiveDate, Vec<BreakEvent>> {
        let today = self.today();
        let since = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        let mut by_day = group_by_day(events, &self.clock.timezone());
        by_day.retain(|date, _| *date > since && *date <= today);
        by_day
    }
}
