pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tally_core::config::{AppConfig, LoadOptions, LogFormat};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "tally",
    about = "Tally timesheet workflow CLI",
    long_about = "Inspect timesheet workflow decisions: per-action permissions, batch decisions, action presentation, transition chains and effective configuration.",
    after_help = "Examples:\n  tally resolve --role lecturer --status TUTOR_CONFIRMED\n  tally batch --role admin --action approve --status LECTURER_CONFIRMED --status TUTOR_CONFIRMED\n  tally plan --role admin --from TUTOR_CONFIRMED --goal FINAL_CONFIRMED"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Resolve one action, or every action, for a role and status")]
    Resolve {
        #[arg(long)]
        role: String,
        #[arg(long, help = "Canonical or legacy status name")]
        status: String,
        #[arg(long)]
        action: Option<String>,
    },
    #[command(about = "Resolve one action across a selection of timesheets")]
    Batch {
        #[arg(long)]
        role: String,
        #[arg(long)]
        action: String,
        #[arg(long = "status", help = "Status of each selected timesheet, repeatable")]
        statuses: Vec<String>,
    },
    #[command(about = "List actions in display order with exactly one primary")]
    Actions {
        #[arg(long)]
        role: String,
        #[arg(long)]
        status: String,
    },
    #[command(about = "Plan the chain of transitions from one status to a goal status")]
    Plan {
        #[arg(long)]
        role: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        goal: String,
    },
    #[command(about = "Print the transition table with the roles allowed to perform each step")]
    Table,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging() {
        eprintln!("logging disabled: {error:#}");
    }

    let result = match cli.command {
        Command::Resolve { role, status, action } => {
            commands::resolve::run(&role, &status, action.as_deref())
        }
        Command::Batch { role, action, statuses } => {
            commands::batch::run(&role, &action, &statuses)
        }
        Command::Actions { role, status } => commands::actions::run(&role, &status),
        Command::Plan { role, from, goal } => commands::plan::run(&role, &from, &goal),
        Command::Table => commands::table::run(),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout carries only the JSON result line. A config
/// that fails to load is reported by the command itself.
fn init_logging() -> anyhow::Result<()> {
    let config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow::anyhow!(error))
}
