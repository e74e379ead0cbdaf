//! Validate a configuration without running it.
//!
//! Resolves every configured plugin against the catalog, checks their
//! requirements, and builds the experiment (Action constructors validate
//! their schedule windows). Fails fast with the first precise error.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use colored::Colorize;
use demes::prelude::*;

use super::full_catalog;

pub fn run(config_path: &str) -> Result<()> {
    let path = Path::new(config_path);
    if !path.exists() {
        bail!("Configuration file {} not found", config_path.cyan());
    }

    let config = Config::load(path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    let catalog = full_catalog()?;

    // Building the experiment performs every validation a run would:
    // topology/cell/action resolution, requirement checks, and schedule
    // window construction. Data files land in a scratch directory.
    let scratch = std::env::temp_dir().join(format!("demes-check-{}", std::process::id()));
    let experiment = Experiment::new(config, &catalog, &scratch)
        .context("Configuration is invalid")?;
    let stats = experiment.stats();
    drop(experiment);
    let _ = std::fs::remove_dir_all(&scratch);

    println!("{} Configuration is valid", "✓".green().bold());
    println!(
        "  {} cells, {} actions registered",
        stats.cells.to_string().green(),
        stats.actions.to_string().green()
    );

    Ok(())
}
