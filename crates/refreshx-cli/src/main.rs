use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod commands;

/// Environment variable holding the log filter, e.g. `refreshx_core=debug`.
const LOG_ENV: &str = "REFRESHX_LOG";

#[derive(Parser)]
#[command(name = "refreshx", version, about = "RefreshX break scheduler CLI")]
struct Cli {
    /// Act on behalf of this user instead of the local one
    #[arg(long, global = true)]
    user: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's break schedule
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Break reminders
    Reminders {
        #[command(subcommand)]
        action: commands::reminders::RemindersAction,
    },
    /// Start, log and list breaks
    Break {
        #[command(subcommand)]
        action: commands::breaks::BreakAction,
    },
    /// Progress statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Exercise library
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// Personal exercise routine
    Routine {
        #[command(subcommand)]
        action: commands::routine::RoutineAction,
    },
    /// User profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let user = cli.user;
    let result = match cli.command {
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Reminders { action } => commands::reminders::run(action),
        Commands::Break { action } => commands::breaks::run(action, user),
        Commands::Stats { action } => commands::stats::run(action, user),
        Commands::Exercise { action } => commands::exercise::run(action),
        Commands::Routine { action } => commands::routine::run(action, user),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "refreshx", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
