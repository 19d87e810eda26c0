//! Plan command handler
//!
//! Prints, for every configured (repository, path) unit, the search the run
//! would issue. Works offline and needs no credentials.

use anyhow::Result;
use artsweep_core::config::{RepoRetention, SweepConfig};
use artsweep_core::domain::path_spec::PathSpecifier;
use artsweep_core::query::AqlQuery;
use chrono::NaiveDate;
use colored::*;

use crate::config::Config;

/// Handle the plan command
pub fn handle_plan_command(config: &Config) -> Result<()> {
    let sweep = config.load_sweep_config()?;
    let today = chrono::Local::now().date_naive();

    print_plan(&sweep, today);

    Ok(())
}

fn print_plan(sweep: &SweepConfig, today: NaiveDate) {
    println!("{}", "Cleanup plan:".bold());
    println!("  Recycle repo: {}", sweep.recycle.cyan());
    if let Some(host) = &sweep.host {
        println!("  Host:         {}", host.dimmed());
    }
    if !sweep.skip_list.is_empty() {
        println!(
            "  Skip list:    {}",
            sweep.skip_list.iter().collect::<Vec<_>>().join(", ").dimmed()
        );
    }
    println!();

    if sweep.unit_count() == 0 {
        println!("{}", "No repository paths configured.".yellow());
        return;
    }

    for (repo, retention, spec) in sweep.units() {
        print_unit(sweep, repo, retention, spec, today);
    }
}

fn print_unit(
    sweep: &SweepConfig,
    repo: &str,
    retention: &RepoRetention,
    spec: &PathSpecifier,
    today: NaiveDate,
) {
    println!("  {} {}/{}", "▸".cyan(), repo.bold(), spec.path());
    println!("    Type:      {}", spec.item_type());
    println!("    Retention: {}", retention.retention);
    if let Some(cutoff) = retention.retention.cutoff_date(today) {
        println!("    Before:    {}", cutoff.to_string().dimmed());
    }
    println!(
        "    Query:     {}",
        AqlQuery::for_unit(repo, retention, spec).to_string().dimmed()
    );
    if sweep.skip_list.contains(spec.path()) {
        println!(
            "    {}",
            "Path is on the skip list; a run will stop here".red().bold()
        );
    }
    println!();
}
