//! Break reminders.
//!
//! [`plan_reminders`] maps upcoming break times to lead-time reminders.
//! [`schedule_break_notifications`] runs the full daily flow against a
//! [`Notifier`], the seam to the platform notification service.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schedule::WorkSchedule;

/// Default lead time before a break.
pub const DEFAULT_LEAD_MINUTES: u32 = 5;

/// Default notification title.
pub const DEFAULT_TITLE: &str = "Break Reminder";

/// A reminder computed for one break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedReminder {
    /// Position of the break in the day's list
    pub slot: usize,
    pub fire_at: NaiveDateTime,
    pub break_at: NaiveDateTime,
    pub message: String,
}

/// Plan one reminder per upcoming break, `lead` ahead of it.
///
/// Breaks before `now` are skipped. So are breaks whose reminder time has
/// already passed: a break inside the lead window gets no reminder at all.
/// Input order is preserved.
pub fn plan_reminders<F>(
    break_times: &[NaiveDateTime],
    lead: Duration,
    now: NaiveDateTime,
    message_builder: F,
) -> Vec<PlannedReminder>
where
    F: Fn(NaiveDateTime) -> String,
{
    let mut out = Vec::with_capacity(break_times.len());
    for (slot, &break_at) in break_times.iter().enumerate() {
        if break_at < now {
            tracing::debug!(%break_at, "break already passed, no reminder");
            continue;
        }
        let fire_at = break_at - lead;
        if fire_at < now {
            tracing::debug!(%break_at, %fire_at, "reminder time already passed, dropping");
            continue;
        }
        out.push(PlannedReminder {
            slot,
            fire_at,
            break_at,
            message: message_builder(break_at),
        });
    }
    out
}

/// A notification handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Stable per-day identifier, `break-reminder-{index}`
    pub id: String,
    pub fire_at: NaiveDateTime,
    pub title: String,
    pub body: String,
}

/// Reminder settings from the `[reminders]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_lead_minutes")]
    pub lead_minutes: u32,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_true() -> bool {
    true
}
fn default_lead_minutes() -> u32 {
    DEFAULT_LEAD_MINUTES
}
fn default_title() -> String {
    DEFAULT_TITLE.into()
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            lead_minutes: DEFAULT_LEAD_MINUTES,
            title: default_title(),
        }
    }
}

impl ReminderSettings {
    pub fn lead(&self) -> Duration {
        Duration::minutes(i64::from(self.lead_minutes))
    }
}

/// Body text shown in the reminder.
pub fn reminder_body(break_duration_minutes: u32, lead_minutes: u32) -> String {
    format!("Your {break_duration_minutes}-minute break starts in {lead_minutes} minutes!")
}

/// Platform notification service.
pub trait Notifier {
    /// Drop every notification scheduled earlier.
    fn clear_pending(&mut self) -> Result<()>;

    /// Register one notification.
    fn schedule(&mut self, notification: &Notification) -> Result<()>;
}

/// Notifier that keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    pending: Vec<Notification>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn into_pending(self) -> Vec<Notification> {
        self.pending
    }
}

impl Notifier for MemoryNotifier {
    fn clear_pending(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn schedule(&mut self, notification: &Notification) -> Result<()> {
        self.pending.push(notification.clone());
        Ok(())
    }
}

/// Build today's notifications without touching a notifier.
pub fn build_notifications(
    schedule: &WorkSchedule,
    settings: &ReminderSettings,
    now: NaiveDateTime,
) -> Vec<Notification> {
    let today = now.date();
    if !settings.enabled || !schedule.is_working_day(today) {
        return Vec::new();
    }

    let break_times = schedule.break_times(today);
    let body = reminder_body(schedule.break_duration_minutes, settings.lead_minutes);
    let planned = plan_reminders(&break_times, settings.lead(), now, |_| body.clone());

    planned
        .into_iter()
        // slot within the full day list keeps ids stable across reschedules
        .map(|r| Notification {
            id: format!("break-reminder-{}", r.slot),
            fire_at: r.fire_at,
            title: settings.title.clone(),
            body: r.message,
        })
        .collect()
}

/// Replace the notifier's pending reminders with today's.
///
/// Returns the number of notifications scheduled; zero on a day off.
///
/// # Errors
/// Propagates notifier failures.
pub fn schedule_break_notifications<N: Notifier + ?Sized>(
    schedule: &WorkSchedule,
    settings: &ReminderSettings,
    now: NaiveDateTime,
    notifier: &mut N,
) -> Result<usize> {
    notifier.clear_pending()?;

    if !schedule.is_working_day(now.date()) {
        tracing::info!(date = %now.date(), "not a working day, no reminders scheduled");
        return Ok(0);
    }

    let notifications = build_notifications(schedule, settings, now);
    for n in &notifications {
        notifier.schedule(n)?;
        tracing::info!(id = %n.id, fire_at = %n.fire_at, "scheduled break reminder");
    }
    Ok(notifications.len())
}
