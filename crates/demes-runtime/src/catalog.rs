//! The plugin catalog: descriptors plus constructors.
//!
//! The registry answers "which descriptor"; the catalog also answers "how
//! do I build one". Loading code from disk is out of scope — every plugin
//! known to an experiment is registered here ahead of time, during the
//! discovery phase, and the catalog is read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use demes_core::action::Action;
use demes_core::error::{DemesError, Result};
use demes_core::plugin::{PluginDescriptor, PluginKind, PluginRegistry};
use demes_core::types::Epoch;
use demes_core::version::Constraint;

use crate::cells::CellFactory;
use crate::config::Config;
use crate::topology::TopologyFactory;

/// Everything an Action constructor may consult.
pub struct ActionSetup<'a> {
    pub config: &'a Config,
    /// The experiment's configured epoch count (the default `epoch_end`),
    /// or -1 when unbounded.
    pub epochs: Epoch,
    pub max_types: usize,
    pub data_dir: &'a Path,
}

/// Constructor signature for Action plugins.
pub type ActionFactory = fn(&ActionSetup<'_>) -> Result<Box<dyn Action>>;

/// Registry plus factory tables for all plugin kinds.
#[derive(Default)]
pub struct PluginCatalog {
    registry: PluginRegistry,
    actions: HashMap<String, ActionFactory>,
    topologies: HashMap<String, TopologyFactory>,
    cells: HashMap<String, CellFactory>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn register_action(
        &mut self,
        descriptor: PluginDescriptor,
        factory: ActionFactory,
    ) -> Result<()> {
        debug_assert_eq!(descriptor.kind, PluginKind::Action);
        let name = descriptor.name.clone();
        self.registry.register(descriptor)?;
        self.actions.insert(name, factory);
        Ok(())
    }

    pub fn register_topology(
        &mut self,
        descriptor: PluginDescriptor,
        factory: TopologyFactory,
    ) -> Result<()> {
        debug_assert_eq!(descriptor.kind, PluginKind::Topology);
        let name = descriptor.name.clone();
        self.registry.register(descriptor)?;
        self.topologies.insert(name, factory);
        Ok(())
    }

    pub fn register_cell(
        &mut self,
        descriptor: PluginDescriptor,
        factory: CellFactory,
    ) -> Result<()> {
        debug_assert_eq!(descriptor.kind, PluginKind::Cell);
        let name = descriptor.name.clone();
        self.registry.register(descriptor)?;
        self.cells.insert(name, factory);
        Ok(())
    }

    /// All registered descriptors, sorted by kind, name, then version.
    pub fn descriptors(&self) -> Vec<&PluginDescriptor> {
        let mut all: Vec<&PluginDescriptor> = self.registry.descriptors().collect();
        all.sort_by(|a, b| {
            (a.kind as u8, &a.name, a.version).cmp(&(b.kind as u8, &b.name, b.version))
        });
        all
    }

    pub fn action_factory(&self, name: &str) -> Result<ActionFactory> {
        self.actions
            .get(name)
            .copied()
            .ok_or_else(|| DemesError::plugin_not_found(PluginKind::Action, name))
    }

    pub fn topology_factory(&self, name: &str) -> Result<TopologyFactory> {
        self.topologies
            .get(name)
            .copied()
            .ok_or_else(|| DemesError::plugin_not_found(PluginKind::Topology, name))
    }

    pub fn cell_factory(&self, name: &str) -> Result<CellFactory> {
        self.cells
            .get(name)
            .copied()
            .ok_or_else(|| DemesError::plugin_not_found(PluginKind::Cell, name))
    }
}

/// Split a configured plugin request into its name and optional version
/// constraint: `"drift"`, `"drift>=1.2"`, or `"drift =1.0.0"`.
pub fn parse_plugin_request(token: &str) -> Result<(String, Option<Constraint>)> {
    match token.find(&['<', '>', '='][..]) {
        Some(at) => {
            let name = token[..at].trim().to_string();
            let constraint = token[at..].trim().parse()?;
            Ok((name, Some(constraint)))
        }
        None => Ok((token.trim().to_string(), None)),
    }
}
