use chrono::{DateTime, Utc};
use clap::Subcommand;
use refreshx_core::session::format_countdown;
use refreshx_core::{
    BreakEvent, BreakSession, BreakStore, Config, Database, SessionUpdate, ValidationError,
};
use std::time::Duration;
use uuid::Uuid;

use super::{print_json, resolve_user, CliResult};

#[derive(Subcommand)]
pub enum BreakAction {
    /// Start a break now
    Start {
        /// Exercises to walk through; defaults to the saved routine
        #[arg(long = "exercise")]
        exercises: Vec<String>,
        /// Run the countdown in the terminal and complete the break at zero
        #[arg(long)]
        wait: bool,
    },
    /// Complete a started break
    Finish {
        /// Break id
        id: Uuid,
        /// Exercise that was done
        #[arg(long)]
        exercise: Option<String>,
    },
    /// Record a break after the fact
    Log {
        /// Start time, RFC 3339 (default: now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        completed: bool,
        #[arg(long)]
        exercise: Option<String>,
    },
    /// Break history, newest first
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: BreakAction, user: Option<Uuid>) -> CliResult {
    let config = Config::load()?;
    let user_id = resolve_user(&config, user);
    let db = Database::open()?;

    match action {
        BreakAction::Start { exercises, wait } => {
            let routine = if exercises.is_empty() {
                db.routine(user_id)?.into_iter().map(|e| e.id).collect()
            } else {
                ensure_exercises_exist(&db, &exercises)?;
                exercises
            };
            let now = Utc::now();
            if let Some(open) = db.breaks_for_user(user_id)?.into_iter().find(|e| e.is_active(now)) {
                return Err(format!("break {} is already in progress", open.id).into());
            }
            let minutes = u32::try_from(config.profile.break_duration).unwrap_or(0);
            let mut session = BreakSession::start(user_id, now, minutes, routine);
            db.insert_break(session.event())?;

            if wait {
                run_countdown(&mut session, &db)?;
            }
            print_json(&session)?;
        }
        BreakAction::Finish { id, exercise } => {
            let mut event = db
                .breaks_for_user(user_id)?
                .into_iter()
                .find(|e| e.id == id)
                .ok_or_else(|| ValidationError::NotFound {
                    kind: "break".into(),
                    id: id.to_string(),
                })?;
            if let Some(ex) = exercise {
                ensure_exercises_exist(&db, std::slice::from_ref(&ex))?;
                event.exercise_id = Some(ex);
            }
            event.completed = true;
            db.update_break(&event)?;
            print_json(&event)?;
        }
        BreakAction::Log {
            at,
            completed,
            exercise,
        } => {
            let when = match at {
                Some(raw) => DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| ValidationError::InvalidValue {
                        field: "at".into(),
                        message: format!("'{raw}' is not RFC 3339: {e}"),
                    })?
                    .with_timezone(&Utc),
                None => Utc::now(),
            };
            let mut event = BreakEvent::new(user_id, when);
            event.completed = completed;
            if let Some(ex) = exercise {
                ensure_exercises_exist(&db, std::slice::from_ref(&ex))?;
                event.exercise_id = Some(ex);
            }
            db.insert_break(&event)?;
            print_json(&event)?;
        }
        BreakAction::List { limit } => {
            let mut history = db.breaks_for_user(user_id)?;
            if let Some(limit) = limit {
                history.truncate(limit);
            }
            print_json(&history)?;
        }
    }
    Ok(())
}

fn ensure_exercises_exist(db: &Database, ids: &[String]) -> Result<(), ValidationError> {
    let known = db
        .exercises_by_ids(ids)
        .map_err(|e| ValidationError::InvalidValue {
            field: "exercise".into(),
            message: e.to_string(),
        })?;
    match ids.iter().find(|id| !known.contains_key(*id)) {
        Some(missing) => Err(ValidationError::NotFound {
            kind: "exercise".into(),
            id: missing.clone(),
        }),
        None => Ok(()),
    }
}

fn run_countdown(session: &mut BreakSession, db: &Database) -> CliResult {
    if let Some(current) = session.current_exercise() {
        eprintln!("exercise: {current}");
    }
    loop {
        eprint!("\r{} ", format_countdown(session.remaining_secs()));
        std::thread::sleep(Duration::from_secs(1));
        if let SessionUpdate::Finished { event } = session.tick(1) {
            eprintln!("\rbreak complete");
            db.update_break(&event)?;
            return Ok(());
        }
    }
}
