use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seconds after its scheduled time during which an open break counts as active.
pub const ACTIVE_WINDOW_SECS: i64 = 60;

/// One break taken (or started) by a user.
///
/// Created when a break session starts, flipped to `completed` once when the
/// session ends or its last exercise is done. Never deleted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub exercise_id: Option<String>,
}

impl BreakEvent {
    /// A new, not yet completed break starting at `scheduled_time`.
    pub fn new(user_id: Uuid, scheduled_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            scheduled_time,
            completed: false,
            exercise_id: None,
        }
    }

    /// Calendar day of the break in `tz`.
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.scheduled_time.with_timezone(tz).date_naive()
    }

    /// Open and within its first minute.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        let end = self.scheduled_time + Duration::seconds(ACTIVE_WINDOW_SECS);
        !self.completed && now >= self.scheduled_time && now <= end
    }
}
