//! demes CLI - run and inspect epoch-based population experiments.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "demes")]
#[command(author, version, about = "demes - pluggable epoch-based population simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an experiment from a configuration file
    Run {
        /// Path to the experiment configuration (TOML)
        config: String,

        /// Override the configured epoch count
        #[arg(short, long)]
        epochs: Option<i64>,

        /// Directory for data files (default: ./data)
        #[arg(short, long, default_value = "data")]
        data_dir: String,
    },

    /// List the available plugins
    Plugins,

    /// Validate a configuration without running it
    Check {
        /// Path to the experiment configuration (TOML)
        config: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            epochs,
            data_dir,
        } => commands::run::run(&config, epochs, &data_dir, cli.verbose),
        Commands::Plugins => commands::plugins::run(),
        Commands::Check { config } => commands::check::run(&config),
    }
}
