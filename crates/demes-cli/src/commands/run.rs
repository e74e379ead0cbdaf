//! Run an experiment from a configuration file.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use colored::Colorize;
use demes::prelude::*;

use super::full_catalog;

pub fn run(config_path: &str, epochs: Option<i64>, data_dir: &str, verbose: bool) -> Result<()> {
    let path = Path::new(config_path);
    if !path.exists() {
        bail!("Configuration file {} not found", config_path.cyan());
    }

    let mut config = Config::load(path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    if let Some(epochs) = epochs {
        config.set("experiment", "epochs", epochs);
    }

    let catalog = full_catalog()?;
    let mut experiment = Experiment::new(config, &catalog, data_dir)
        .context("Failed to build experiment")?;

    let total = experiment.configured_epochs();
    if total < 0 {
        bail!(
            "experiment.epochs is unbounded; pass {} to bound the run",
            "--epochs N".cyan()
        );
    }

    println!(
        "{} Running {} epochs (run {})...",
        "→".blue(),
        total.to_string().cyan(),
        experiment.id()
    );

    for _ in 0..total {
        let events = experiment.epoch()?;
        if verbose {
            for event in &events {
                if let ExperimentEvent::ActionFired { name } = event {
                    println!(
                        "  epoch {}: {}",
                        experiment.current_epoch() - 1,
                        name.cyan()
                    );
                }
            }
        }
    }

    let stats = experiment.stats();
    println!();
    println!("{} Experiment complete!", "✓".green().bold());
    println!("  Epochs:  {}", stats.epoch.to_string().green());
    println!(
        "  Cells:   {} on {} edges",
        stats.cells.to_string().green(),
        stats.edges.to_string().green()
    );
    for (cell_type, count) in stats.type_counts.iter().enumerate() {
        println!("    type {}: {}", cell_type, count);
    }
    println!("  Data in: {}", experiment.data_dir().display());

    Ok(())
}
