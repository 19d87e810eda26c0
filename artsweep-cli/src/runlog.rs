//! Run log
//!
//! Every run writes a timestamped log file next to the console output. After
//! a successful run the file is uploaded to the recycle repository.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default log filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "artsweep=debug";

/// A run log file on local disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// File name for a run started at `started`
    pub fn file_name(started: DateTime<Local>) -> String {
        format!("cleanup_{}.log", started.format("%Y-%m-%d_%H-%M-%S"))
    }

    /// Creates the log file for a run started at `started` inside `dir`
    pub fn create(dir: &Path, started: DateTime<Local>) -> Result<(Self, File)> {
        let path = dir.join(Self::file_name(started));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create run log {}", path.display()))?;
        Ok((Self { path }, file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Installs the global tracing subscriber
///
/// Console output always; a plain-text copy goes to `run_log` when given.
pub fn init_logging(run_log: Option<File>) -> Result<()> {
    let file_layer = run_log.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")
}
