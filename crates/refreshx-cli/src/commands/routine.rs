use clap::Subcommand;
use refreshx_core::{BreakStore, Config, Database};
use uuid::Uuid;

use super::{print_json, resolve_user, CliResult};

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Append an exercise to the routine
    Add { exercise_id: String },
    /// Drop an exercise from the routine
    Remove { exercise_id: String },
    /// Routine exercises in order
    List,
}

pub fn run(action: RoutineAction, user: Option<Uuid>) -> CliResult {
    let config = Config::load()?;
    let user_id = resolve_user(&config, user);
    let db = Database::open()?;

    match action {
        RoutineAction::Add { exercise_id } => {
            db.add_to_routine(user_id, &exercise_id)?;
            println!("ok");
        }
        RoutineAction::Remove { exercise_id } => {
            db.remove_from_routine(user_id, &exercise_id)?;
            println!("ok");
        }
        RoutineAction::List => {
            print_json(&db.routine(user_id)?)?;
        }
    }
    Ok(())
}
