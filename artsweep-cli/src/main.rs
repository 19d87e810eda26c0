//! Artsweep CLI
//!
//! Scheduled housekeeping for an artifact repository service. Finds artifacts
//! older than each configured retention period, copies them to a recycle
//! repository and deletes them from their source.
//!
//! Architecture:
//! - Configuration: command line and environment, plus the YAML cleanup plan
//! - Repositories: HTTP calls to the artifact repository service
//! - Services: the cleanup run (path guard, search, copy, delete)
//! - Run log: console and file logging, uploaded after the run

mod commands;
mod config;
mod repository;
mod runlog;
mod service;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use runlog::{RunLog, init_logging};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "artsweep", version)]
#[command(about = "Artifact repository retention cleanup", long_about = None)]
struct Cli {
    /// Base URL of the artifact repository service
    #[arg(long, env = "ARTSWEEP_HOST")]
    host: Option<String>,

    /// API key for the artifact repository service
    #[arg(long, env = "ART_API", hide_env_values = true)]
    api_key: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    insecure: bool,

    /// Cleanup plan to use
    #[arg(long, default_value = "artifactory.yaml")]
    config_file: PathBuf,

    /// Directory the run log is written to
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (run_log, log_file) = if cli.command.writes_run_log() {
        let (run_log, file) = RunLog::create(&cli.log_dir, chrono::Local::now())?;
        (Some(run_log), Some(file))
    } else {
        (None, None)
    };
    init_logging(log_file)?;

    let config = Config {
        host: cli.host,
        api_key: cli.api_key,
        insecure: cli.insecure,
        config_file: cli.config_file,
    };

    if let Err(e) = handle_command(cli.command, &config, run_log.as_ref()).await {
        error!("Run aborted: {:#}", e);
        return Err(e);
    }

    Ok(())
}
