//! Run command handler
//!
//! Loads the cleanup plan, connects to the service and performs the cleanup
//! in dry-run or production mode, then uploads the run log.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::repository::HttpArtifactRepository;
use crate::runlog::RunLog;
use crate::service::{CleanupService, RunContext, RunMode};

/// Run arguments
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Dry run and verify the delete report
    #[arg(long, conflicts_with = "production", required_unless_present = "production")]
    dryrun: bool,

    /// Run in production mode, changes will be made
    #[arg(long, required_unless_present = "dryrun")]
    production: bool,

    /// Copy candidates to the recycle repository without deleting them
    #[arg(long)]
    copy_only: bool,

    /// Do not upload the run log when the run finishes
    #[arg(long)]
    skip_log_upload: bool,
}

impl RunArgs {
    fn mode(&self) -> RunMode {
        if self.production && !self.dryrun {
            RunMode::Production
        } else {
            RunMode::DryRun
        }
    }
}

/// Handle the run command
pub async fn handle_run_command(
    args: RunArgs,
    config: &Config,
    run_log: Option<&RunLog>,
) -> Result<()> {
    let mode = args.mode();
    let sweep = config.load_sweep_config()?;
    let host = config.resolve_host(&sweep)?;
    let client = config.client(&host)?;
    info!(
        "Loaded {} with {} repository path(s), recycle repo '{}', host {}",
        config.config_file.display(),
        sweep.unit_count(),
        sweep.recycle,
        host
    );

    let mut context = RunContext::new(mode, &sweep);
    if args.copy_only {
        context = context.copy_only();
    }

    let repository = Arc::new(HttpArtifactRepository::new(client));
    let service = CleanupService::new(repository, context);

    service.run(&sweep).await?;

    match run_log {
        Some(run_log) if !args.skip_log_upload => service.upload_run_log(run_log.path()).await?,
        Some(run_log) => warn!(
            "Skipping upload of run log {}",
            run_log.path().display()
        ),
        None => {}
    }

    Ok(())
}
