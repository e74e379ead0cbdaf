//! # demes Runtime
//!
//! Experiment driver, population graph, and data sinks for the demes
//! simulation engine.
//!
//! The runtime supplies everything the core contracts leave to
//! collaborators: a TOML-backed [`config::Config`], a petgraph-backed
//! [`population::Population`], built-in topology and cell plugins, the
//! [`experiment::Experiment`] epoch loop, and comma-separated data files
//! for Action output.

pub mod catalog;
pub mod cells;
pub mod config;
pub mod datafile;
pub mod experiment;
pub mod population;
pub mod topology;
pub mod prelude;

use demes_core::error::Result;
use demes_core::plugin::{PluginDescriptor, PluginKind, Requirement, ENGINE_NAME};
use demes_core::version::Version;

use catalog::PluginCatalog;

/// Register the runtime's built-in Topology and Cell plugins.
pub fn register_builtins(catalog: &mut PluginCatalog) -> Result<()> {
    let engine = Requirement::parse(ENGINE_NAME, ">=1.0")?;

    catalog.register_topology(
        PluginDescriptor::new("lattice", PluginKind::Topology, Version::new(1, 0, 0))
            .with_description("2-D lattice with 4-neighbor adjacency, optionally periodic")
            .with_requirement(engine.clone()),
        topology::build_lattice,
    )?;
    catalog.register_topology(
        PluginDescriptor::new("well_mixed", PluginKind::Topology, Version::new(1, 0, 0))
            .with_description("Well-mixed population: a complete graph")
            .with_requirement(engine.clone()),
        topology::build_well_mixed,
    )?;
    catalog.register_cell(
        PluginDescriptor::new(cells::DriftCell::NAME, PluginKind::Cell, Version::new(1, 0, 0))
            .with_description("Neutral drift: cells re-roll their type with fixed probability")
            .with_requirement(engine),
        cells::DriftCell::from_config,
    )?;

    Ok(())
}
