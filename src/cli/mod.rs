//! Command-line interface for the cadence engine.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

pub use output::{output, truncate, CommandOutput};

/// Recurring task materialization engine.
#[derive(Parser, Debug)]
#[command(name = "cadence", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database and default configuration
    Init(commands::init::InitArgs),
    /// Materialize task instances for a calendar day
    Run(commands::run::RunArgs),
}

/// Report a top-level command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) {
    if json_mode {
        let payload = serde_json::json!({
            "success": false,
            "error": format!("{:#}", err),
        });
        eprintln!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
    } else {
        eprintln!("Error: {:#}", err);
    }
    std::process::exit(1);
}
