//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod plan;
mod run;

pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;
use crate::runlog::RunLog;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Clean up the configured repositories
    Run(RunArgs),
    /// Show what each configured path would search for, without contacting the service
    Plan,
}

impl Commands {
    /// Whether this command writes a run log
    pub fn writes_run_log(&self) -> bool {
        matches!(self, Commands::Run(_))
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
/// * `run_log` - The run log file, when the command writes one
pub async fn handle_command(
    command: Commands,
    config: &Config,
    run_log: Option<&RunLog>,
) -> Result<()> {
    match command {
        Commands::Run(args) => run::handle_run_command(args, config, run_log).await,
        Commands::Plan => plan::handle_plan_command(config),
    }
}
