use clap::Subcommand;
use refreshx_core::{Config, MemoryNotifier};

use super::{planner, print_json, CliResult};

#[derive(Subcommand)]
pub enum RemindersAction {
    /// Reminders that would be scheduled now for the rest of today
    Plan,
}

pub fn run(action: RemindersAction) -> CliResult {
    let config = Config::load()?;

    match action {
        RemindersAction::Plan => {
            let mut notifier = MemoryNotifier::new();
            let count = planner(&config).schedule_notifications(&mut notifier)?;
            tracing::info!(count, "planned reminders");
            print_json(notifier.pending())?;
        }
    }
    Ok(())
}
