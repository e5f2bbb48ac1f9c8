mod config;
pub mod database;
pub mod migrations;

pub use config::Config;
pub use database::Database;

use std::collections::HashMap;
use std::path::PathBuf;

use uuid::Uuid;

use crate::error::{ConfigError, Result};
use crate::events::BreakEvent;
use crate::exercise::ExerciseSpec;

/// Environment variable overriding the data directory outright.
pub const DATA_DIR_ENV: &str = "REFRESHX_DATA_DIR";

/// Returns `~/.config/refreshx[-dev]/` based on REFRESHX_ENV, unless
/// REFRESHX_DATA_DIR points somewhere else.
///
/// Set REFRESHX_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("REFRESHX_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("refreshx-dev")
            } else {
                base_dir.join("refreshx")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// The remote data store, narrowed to what the core reads and writes.
///
/// Implementations own retries and transport; the core only sees results.
pub trait BreakStore {
    /// Persist a newly started break.
    fn insert_break(&self, event: &BreakEvent) -> Result<()>;

    /// Overwrite `completed` and `exercise_id` of an existing break.
    fn update_break(&self, event: &BreakEvent) -> Result<()>;

    /// All breaks of a user, newest first.
    fn breaks_for_user(&self, user_id: Uuid) -> Result<Vec<BreakEvent>>;

    /// Insert or replace a library exercise.
    fn upsert_exercise(&self, exercise: &ExerciseSpec) -> Result<()>;

    /// Exercises by id; unknown ids are absent from the map.
    fn exercises_by_ids(&self, ids: &[String]) -> Result<HashMap<String, ExerciseSpec>>;

    /// The whole exercise library, ordered by name.
    fn all_exercises(&self) -> Result<Vec<ExerciseSpec>>;

    /// Append an exercise to the user's routine. Adding twice is a no-op.
    fn add_to_routine(&self, user_id: Uuid, exercise_id: &str) -> Result<()>;

    /// Remove an exercise from the user's routine.
    fn remove_from_routine(&self, user_id: Uuid, exercise_id: &str) -> Result<()>;

    /// Routine exercises in the order they were added.
    fn routine(&self, user_id: Uuid) -> Result<Vec<ExerciseSpec>>;
}
