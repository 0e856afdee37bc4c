use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "scoredeck", version, about = "Scoredeck station CLI")]
struct Cli {
    /// Session identifier (defaults to the pinned active session)
    #[arg(long, global = true)]
    session: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session selection and lifecycle
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Countdown timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Counter slot edits, resize and rotation
    Slot {
        #[command(subcommand)]
        action: commands::slot::SlotAction,
    },
    /// Submit the current tallies to the form endpoint
    Submit,
    /// Export the current tallies as a CSV file
    Export {
        /// Directory to write the CSV into (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Print name suggestions from the configured source
    Suggest,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let session = cli.session;
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(session.as_deref(), action),
        Commands::Timer { action } => commands::timer::run(session.as_deref(), action),
        Commands::Slot { action } => commands::slot::run(session.as_deref(), action),
        Commands::Submit => commands::submit::run(session.as_deref()),
        Commands::Export { dir } => commands::export::run(session.as_deref(), dir),
        Commands::Suggest => commands::suggest::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
