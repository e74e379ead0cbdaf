//! List the available plugins.

use anyhow::Result;
use colored::Colorize;

use super::full_catalog;

pub fn run() -> Result<()> {
    let catalog = full_catalog()?;

    println!("{}", "Available plugins:".bold());
    for descriptor in catalog.descriptors() {
        println!(
            "  {:<14} {:<18} {}  {}",
            descriptor.kind.to_string().blue(),
            descriptor.name.cyan(),
            descriptor.version.to_string().yellow(),
            descriptor.description
        );
    }

    Ok(())
}
