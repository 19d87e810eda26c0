//! Run context
//!
//! Settings fixed for the whole run. Built once at startup and only read
//! afterwards.

use artsweep_core::config::SweepConfig;
use artsweep_core::domain::skip_list::SkipList;
use std::fmt;

/// Whether mutating calls take effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Report what would happen; nothing is deleted
    DryRun,
    /// Copy and delete for real
    Production,
}

impl RunMode {
    pub fn is_dry_run(&self) -> bool {
        matches!(self, RunMode::DryRun)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::DryRun => f.write_str("DRY RUN MODE/NO CHANGES WILL BE MADE"),
            RunMode::Production => f.write_str("PRODUCTION MODE/CHANGES WILL BE MADE"),
        }
    }
}

/// Immutable settings threaded through every step of a run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub mode: RunMode,
    /// Destination of every recycled copy
    pub recycle: String,
    pub skip_list: SkipList,
    /// Delete candidates from their source repository
    pub delete: bool,
}

impl RunContext {
    pub fn new(mode: RunMode, config: &SweepConfig) -> Self {
        Self {
            mode,
            recycle: config.recycle.clone(),
            skip_list: config.skip_list.clone(),
            delete: true,
        }
    }

    /// Copy to the recycle repository but leave the sources in place
    pub fn copy_only(mut self) -> Self {
        self.delete = false;
        self
    }
}
