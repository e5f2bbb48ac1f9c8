use chrono::{NaiveDate, NaiveDateTime};
use clap::Subcommand;
use refreshx_core::schedule::{break_interval_minutes, TimeWindow};
use refreshx_core::Config;
use serde::Serialize;

use super::{parse_date, planner, print_json, CliResult};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Break times for today (or --date)
    Today {
        /// Day to lay out, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// When the next break starts
    Next,
}

#[derive(Serialize)]
struct DayPlan {
    date: NaiveDate,
    working_day: bool,
    window: Option<TimeWindow>,
    interval_minutes: Option<u32>,
    break_duration_minutes: u32,
    breaks: Vec<NaiveDateTime>,
}

pub fn run(action: ScheduleAction) -> CliResult {
    let config = Config::load()?;
    let planner = planner(&config);

    match action {
        ScheduleAction::Today { date } => {
            let schedule = planner.schedule();
            let (date, breaks) = match date {
                Some(raw) => {
                    let day = parse_date(&raw)?;
                    (day, schedule.active_break_times(day))
                }
                None => (planner.today(), planner.today_breaks()),
            };
            let window = schedule.window().ok();
            let plan = DayPlan {
                date,
                working_day: schedule.is_working_day(date),
                interval_minutes: window
                    .as_ref()
                    .map(|w| break_interval_minutes(w, config.profile.num_breaks)),
                window,
                break_duration_minutes: schedule.break_duration_minutes,
                breaks,
            };
            print_json(&plan)?;
        }
        ScheduleAction::Next => {
            print_json(&planner.next_break())?;
        }
    }
    Ok(())
}
