//! CLI subcommand implementations.

pub mod check;
pub mod plugins;
pub mod run;

use demes::prelude::*;

/// The full catalog the CLI works with: built-in topologies and cells plus
/// the stock Actions.
pub fn full_catalog() -> anyhow::Result<PluginCatalog> {
    let mut catalog = PluginCatalog::new();
    register_builtins(&mut catalog)?;
    register_stock_plugins(&mut catalog)?;
    Ok(catalog)
}
