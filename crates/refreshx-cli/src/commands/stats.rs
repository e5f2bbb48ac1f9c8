use chrono::NaiveDate;
use clap::Subcommand;
use refreshx_core::{BreakStore, Config, Database};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::{parse_date, planner, print_json, resolve_user, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's progress
    Today,
    /// Consecutive days with a completed break
    Streak,
    /// Breaks and exercises of one day
    Day {
        /// YYYY-MM-DD
        date: String,
    },
    /// Completed and total breaks per day
    Calendar {
        /// How many days back from today
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

#[derive(Serialize)]
struct CalendarDay {
    date: NaiveDate,
    completed: usize,
    total: usize,
}

pub fn run(action: StatsAction, user: Option<Uuid>) -> CliResult {
    let config = Config::load()?;
    let user_id = resolve_user(&config, user);
    let db = Database::open()?;
    let history = db.breaks_for_user(user_id)?;
    let exercise_ids: Vec<String> = history
        .iter()
        .filter_map(|e| e.exercise_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let planner = planner(&config);

    match action {
        StatsAction::Today => {
            let exercises = db.exercises_by_ids(&exercise_ids)?;
            let summary = planner.daily_summary(&history, &exercises);
            print_json(&summary)?;
        }
        StatsAction::Streak => {
            let streak = planner.streak(&history);
            print_json(&json!({ "streak": streak }))?;
        }
        StatsAction::Day { date } => {
            let day = parse_date(&date)?;
            let exercises = db.exercises_by_ids(&exercise_ids)?;
            let detail = planner.day_detail(day, &history, &exercises);
            print_json(&detail)?;
        }
        StatsAction::Calendar { days } => {
            let calendar: Vec<CalendarDay> = planner
                .calendar(&history, days)
                .into_iter()
                .map(|(date, events)| CalendarDay {
                    date,
                    completed: events.iter().filter(|e| e.completed).count(),
                    total: events.len(),
                })
                .collect();
            print_json(&calendar)?;
        }
    }
    Ok(())
}
