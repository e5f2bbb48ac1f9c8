//! SQLite-backed break history and exercise library.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed fractional
//! width so that text ordering matches time ordering.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use uuid::Uuid;

use super::{data_dir, migrations, BreakStore};
use crate::error::{DatabaseError, Result, ValidationError};
use crate::events::BreakEvent;
use crate::exercise::{ExerciseSpec, FocusArea};

const DB_FILE: &str = "refreshx.db";

/// SQLite database holding breaks, exercises and routines.
pub struct Database {
    conn: Connection,
}

type BreakRow = (String, String, String, bool, Option<String>);
type ExerciseRow = (String, String, String, u32, u32, String, f64);

/// Ids bound per `IN (...)` lookup, well under SQLite's variable limit.
const IDS_PER_QUERY: usize = 500;

const EXERCISE_COLUMNS: &str =
    "id, name, instructions, duration, repetitions, focus_area, met_score";

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/refreshx.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join(DB_FILE))
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    fn exercise_exists(&self, id: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM exercises WHERE id = ?1", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn corrupt(table: &str, message: impl Into<String>) -> DatabaseError {
    DatabaseError::CorruptRow {
        table: table.into(),
        message: message.into(),
    }
}

fn break_from_row(row: BreakRow) -> Result<BreakEvent> {
    let (id, user_id, scheduled_time, completed, exercise_id) = row;
    let id = Uuid::parse_str(&id).map_err(|e| corrupt("breaks", e.to_string()))?;
    let user_id = Uuid::parse_str(&user_id).map_err(|e| corrupt("breaks", e.to_string()))?;
    let scheduled_time = DateTime::parse_from_rfc3339(&scheduled_time)
        .map_err(|e| corrupt("breaks", format!("{scheduled_time}: {e}")))?
        .with_timezone(&Utc);
    Ok(BreakEvent {
        id,
        user_id,
        scheduled_time,
        completed,
        exercise_id,
    })
}

fn exercise_from_row(row: ExerciseRow) -> Result<ExerciseSpec> {
    let (id, name, instructions, duration_seconds, repetitions, focus_area, met_score) = row;
    let focus_area: FocusArea = focus_area
        .parse()
        .map_err(|e: ValidationError| corrupt("exercises", e.to_string()))?;
    Ok(ExerciseSpec {
        id,
        name,
        instructions,
        duration_seconds,
        repetitions,
        focus_area,
        met_score,
    })
}

fn read_exercise(row: &rusqlite::Row<'_>) -> rusqlite::Result<ExerciseRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

impl BreakStore for Database {
    fn insert_break(&self, event: &BreakEvent) -> Result<()> {
        self.conn.execute(
            "INSERT INTO breaks (id, user_id, scheduled_time, completed, exercise_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id.to_string(),
                event.user_id.to_string(),
                format_time(&event.scheduled_time),
                event.completed,
                event.exercise_id,
            ],
        )?;
        tracing::debug!(break_id = %event.id, "break inserted");
        Ok(())
    }

    fn update_break(&self, event: &BreakEvent) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE breaks SET completed = ?2, exercise_id = ?3 WHERE id = ?1",
            params![event.id.to_string(), event.completed, event.exercise_id],
        )?;
        if changed == 0 {
            return Err(ValidationError::NotFound {
                kind: "break".into(),
                id: event.id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn breaks_for_user(&self, user_id: Uuid) -> Result<Vec<BreakEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, scheduled_time, completed, exercise_id
             FROM breaks WHERE user_id = ?1
             ORDER BY scheduled_time DESC",
        )?;
        let rows = stmt.query_map([user_id.to_string()], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            events.push(break_from_row(row?)?);
        }
        Ok(events)
    }

    fn upsert_exercise(&self, exercise: &ExerciseSpec) -> Result<()> {
        self.conn.execute(
            "INSERT INTO exercises (id, name, instructions, duration, repetitions, focus_area, met_score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                instructions = excluded.instructions,
                duration = excluded.duration,
                repetitions = excluded.repetitions,
                focus_area = excluded.focus_area,
                met_score = excluded.met_score",
            params![
                exercise.id,
                exercise.name,
                exercise.instructions,
                exercise.duration_seconds,
                exercise.repetitions,
                exercise.focus_area.as_str(),
                exercise.met_score,
            ],
        )?;
        Ok(())
    }

    fn exercises_by_ids(&self, ids: &[String]) -> Result<HashMap<String, ExerciseSpec>> {
        let unique: Vec<&str> = ids
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut out = HashMap::with_capacity(unique.len());
        for chunk in unique.chunks(IDS_PER_QUERY) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!("SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id IN ({placeholders})");
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), read_exercise)?;
            for row in rows {
                let exercise = exercise_from_row(row?)?;
                out.insert(exercise.id.clone(), exercise);
            }
        }
        Ok(out)
    }

    fn all_exercises(&self) -> Result<Vec<ExerciseSpec>> {
        let sql = format!("SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY name, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_exercise)?;
        let exercises = rows
            .map(|row| exercise_from_row(row?))
            .collect::<Result<Vec<_>>>()?;
        Ok(exercises)
    }

    fn add_to_routine(&self, user_id: Uuid, exercise_id: &str) -> Result<()> {
        if !self.exercise_exists(exercise_id)? {
            return Err(ValidationError::NotFound {
                kind: "exercise".into(),
                id: exercise_id.into(),
            }
            .into());
        }
        self.conn.execute(
            "INSERT OR IGNORE INTO routines (user_id, exercise_id, position)
             SELECT ?1, ?2, COALESCE(MAX(position), -1) + 1 FROM routines WHERE user_id = ?1",
            params![user_id.to_string(), exercise_id],
        )?;
        Ok(())
    }

    fn remove_from_routine(&self, user_id: Uuid, exercise_id: &str) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM routines WHERE user_id = ?1 AND exercise_id = ?2",
            params![user_id.to_string(), exercise_id],
        )?;
        if changed == 0 {
            return Err(ValidationError::NotFound {
                kind: "routine exercise".into(),
                id: exercise_id.into(),
            }
            .into());
        }
        Ok(())
    }

    fn routine(&self, user_id: Uuid) -> Result<Vec<ExerciseSpec>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.name, e.instructions, e.duration, e.repetitions, e.focus_area, e.met_score
             FROM routines r JOIN exercises e ON e.id = r.exercise_id
             WHERE r.user_id = ?1
             ORDER BY r.position",
        )?;
        let rows = stmt.query_map([user_id.to_string()], read_exercise)?;
        let exercises = rows
            .map(|row| exercise_from_row(row?))
            .collect::<Result<Vec<_>>>()?;
        Ok(exercises)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::TimeZone;

    fn exercise(id: &str, name: &str, area: FocusArea) -> ExerciseSpec {
        ExerciseSpec {
            id: id.into(),
            name: name.into(),
            instructions: String::new(),
            duration_seconds: 30,
            repetitions: 2,
            focus_area: area,
            met_score: 1.5,
        }
    }

    #[test]
    fn breaks_roundtrip_newest_first() {
        let db = Database::open_memory().unwrap();
        let user = Uuid::new_v4();
        let early = BreakEvent::new(user, Utc.with_ymd_and_hms(2024, 3, 11, 10, 20, 0).unwrap());
        let late = BreakEvent::new(user, Utc.with_ymd_and_hms(2024, 3, 11, 13, 0, 0).unwrap());
        let other = BreakEvent::new(Uuid::new_v4(), Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap());
        db.insert_break(&early).unwrap();
        db.insert_break(&late).unwrap();
        db.insert_break(&other).unwrap();

        let got = db.breaks_for_user(user).unwrap();
        assert_eq!(got, vec![late, early]);
    }

    #[test]
    fn update_break_flips_completion() {
        let db = Database::open_memory().unwrap();
        let mut ev = BreakEvent::new(Uuid::new_v4(), Utc::now());
        db.insert_break(&ev).unwrap();

        ev.completed = true;
        ev.exercise_id = Some("ex-1".into());
        db.update_break(&ev).unwrap();

        let stored = &db.breaks_for_user(ev.user_id).unwrap()[0];
        assert!(stored.completed);
        assert_eq!(stored.exercise_id.as_deref(), Some("ex-1"));
    }

    #[test]
    fn update_unknown_break_is_not_found() {
        let db = Database::open_memory().unwrap();
        let ev = BreakEvent::new(Uuid::new_v4(), Utc::now());
        let err = db.update_break(&ev).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotFound { .. })
        ));
    }

    #[test]
    fn exercise_upsert_and_lookup() {
        let db = Database::open_memory().unwrap();
        db.upsert_exercise(&exercise("e1", "Palming", FocusArea::Eye)).unwrap();
        db.upsert_exercise(&exercise("e2", "Cat stretch", FocusArea::Back)).unwrap();
        db.upsert_exercise(&exercise("e1", "Palming v2", FocusArea::Eye)).unwrap();

        let all = db.all_exercises().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Cat stretch");

        let found = db
            .exercises_by_ids(&["e1".to_string(), "missing".to_string()])
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["e1"].name, "Palming v2");
        assert!(db.exercises_by_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn exercise_lookup_handles_long_histories() {
        let db = Database::open_memory().unwrap();
        db.upsert_exercise(&exercise("e1", "Palming", FocusArea::Eye)).unwrap();
        db.upsert_exercise(&exercise("e2", "Cat stretch", FocusArea::Back)).unwrap();

        // one id per logged break, far more than SQLite binds in one statement
        let ids: Vec<String> = (0..40_000)
            .map(|i| if i % 2 == 0 { "e1" } else { "e2" }.to_string())
            .collect();
        let found = db.exercises_by_ids(&ids).unwrap();
        assert_eq!(found.len(), 2);

        // many distinct ids span several lookups
        let mut distinct: Vec<String> = (0..1_200).map(|i| format!("x{i}")).collect();
        distinct.push("e2".into());
        let found = db.exercises_by_ids(&distinct).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["e2"].name, "Cat stretch");
    }

    #[test]
    fn routine_keeps_insertion_order() {
        let db = Database::open_memory().unwrap();
        let user = Uuid::new_v4();
        db.upsert_exercise(&exercise("a", "Zed", FocusArea::Wrist)).unwrap();
        db.upsert_exercise(&exercise("b", "Alpha", FocusArea::Eye)).unwrap();

        db.add_to_routine(user, "a").unwrap();
        db.add_to_routine(user, "b").unwrap();
        db.add_to_routine(user, "a").unwrap();

        let ids: Vec<String> = db.routine(user).unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        db.remove_from_routine(user, "a").unwrap();
        assert_eq!(db.routine(user).unwrap().len(), 1);
        assert!(db.remove_from_routine(user, "a").is_err());
        assert!(db.add_to_routine(user, "nope").is_err());
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("breaks.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.insert_break(&BreakEvent::new(Uuid::nil(), Utc::now())).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.breaks_for_user(Uuid::nil()).unwrap().len(), 1);
    }
}
