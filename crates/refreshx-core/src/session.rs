//! Break session state machine.
//!
//! A session walks the user through their exercise routine while a countdown
//! runs. It does not use internal threads - the caller reports elapsed time
//! through `tick()`.
//!
//! ## State Transitions
//!
//! ```text
//! Running -> Finished
//! ```
//!
//! A session finishes when the countdown reaches zero, when the last exercise
//! is marked complete, or when the user ends it. The underlying
//! [`BreakEvent`] is then marked completed; callers persist it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::BreakEvent;

/// Countdown used when the profile has no break duration.
pub const DEFAULT_BREAK_MINUTES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Running,
    Finished,
}

/// Outcome of a state-changing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionUpdate {
    /// Nothing observable changed.
    Unchanged,
    /// Moved to another exercise in the routine.
    ExerciseChanged { index: usize },
    /// An exercise was recorded on the break event.
    ExerciseCompleted { exercise_id: String },
    /// The session is over and the event is completed.
    Finished { event: BreakEvent },
}

/// An in-progress break.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakSession {
    event: BreakEvent,
    state: SessionState,
    /// Exercise ids in routine order
    routine: Vec<String>,
    selected_index: usize,
    remaining_secs: u64,
    total_secs: u64,
}

impl BreakSession {
    /// Start a break at `now`. The countdown is `break_duration_minutes`, or
    /// [`DEFAULT_BREAK_MINUTES`] when that is zero.
    pub fn start(
        user_id: Uuid,
        now: DateTime<Utc>,
        break_duration_minutes: u32,
        routine: Vec<String>,
    ) -> Self {
        let minutes = if break_duration_minutes == 0 {
            DEFAULT_BREAK_MINUTES
        } else {
            break_duration_minutes
        };
        let total_secs = u64::from(minutes) * 60;
        let event = BreakEvent::new(user_id, now);
        tracing::info!(break_id = %event.id, total_secs, exercises = routine.len(), "break started");
        Self {
            event,
            state: SessionState::Running,
            routine,
            selected_index: 0,
            remaining_secs: total_secs,
            total_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn event(&self) -> &BreakEvent {
        &self.event
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn current_exercise(&self) -> Option<&str> {
        self.routine.get(self.selected_index).map(String::as_str)
    }

    pub fn routine(&self) -> &[String] {
        &self.routine
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Advance the countdown by `elapsed_secs`.
    pub fn tick(&mut self, elapsed_secs: u64) -> SessionUpdate {
        if !self.is_running() {
            return SessionUpdate::Unchanged;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(elapsed_secs);
        if self.remaining_secs == 0 {
            return self.finish();
        }
        SessionUpdate::Unchanged
    }

    /// Move to the next exercise; past the last one the session ends.
    pub fn next_exercise(&mut self) -> SessionUpdate {
        if !self.is_running() {
            return SessionUpdate::Unchanged;
        }
        if self.selected_index + 1 < self.routine.len() {
            self.selected_index += 1;
            SessionUpdate::ExerciseChanged {
                index: self.selected_index,
            }
        } else {
            self.finish()
        }
    }

    pub fn previous_exercise(&mut self) -> SessionUpdate {
        if !self.is_running() || self.selected_index == 0 {
            return SessionUpdate::Unchanged;
        }
        self.selected_index -= 1;
        SessionUpdate::ExerciseChanged {
            index: self.selected_index,
        }
    }

    /// Record the current exercise as done, then advance.
    ///
    /// Returns the recording update followed by the advance update. With an
    /// empty routine only the advance (which ends the session) happens.
    pub fn mark_exercise_complete(&mut self) -> Vec<SessionUpdate> {
        if !self.is_running() {
            return vec![SessionUpdate::Unchanged];
        }
        let mut updates = Vec::with_capacity(2);
        if let Some(id) = self.current_exercise().map(str::to_string) {
            self.event.exercise_id = Some(id.clone());
            self.event.completed = true;
            updates.push(SessionUpdate::ExerciseCompleted { exercise_id: id });
        }
        updates.push(self.next_exercise());
        updates
    }

    /// End the break early (or on time).
    pub fn end(&mut self) -> SessionUpdate {
        if !self.is_running() {
            return SessionUpdate::Unchanged;
        }
        self.finish()
    }

    fn finish(&mut self) -> SessionUpdate {
        self.state = SessionState::Finished;
        self.event.completed = true;
        self.selected_index = 0;
        tracing::info!(break_id = %self.event.id, "break finished");
        SessionUpdate::Finished {
            event: self.event.clone(),
        }
    }
}

/// `MM:SS` for a countdown in seconds.
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
