use clap::Subcommand;
use refreshx_core::{BreakStore, Database, ExerciseSpec, FocusArea};

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// Add or replace an exercise in the library
    Add {
        /// Exercise id
        id: String,
        /// Display name
        name: String,
        /// eye, back or wrist
        #[arg(long)]
        focus_area: FocusArea,
        /// Seconds per repetition
        #[arg(long, default_value_t = 30)]
        duration: u32,
        #[arg(long, default_value_t = 1)]
        repetitions: u32,
        /// Metabolic equivalent of task
        #[arg(long, default_value_t = 1.5)]
        met: f64,
        #[arg(long, default_value = "")]
        instructions: String,
    },
    /// List the exercise library
    List,
}

pub fn run(action: ExerciseAction) -> CliResult {
    let db = Database::open()?;

    match action {
        ExerciseAction::Add {
            id,
            name,
            focus_area,
            duration,
            repetitions,
            met,
            instructions,
        } => {
            let exercise = ExerciseSpec {
                id,
                name,
                instructions,
                duration_seconds: duration,
                repetitions,
                focus_area,
                met_score: met,
            };
            db.upsert_exercise(&exercise)?;
            print_json(&exercise)?;
        }
        ExerciseAction::List => {
            print_json(&db.all_exercises()?)?;
        }
    }
    Ok(())
}
