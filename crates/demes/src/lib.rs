//! # demes
//!
//! A pluggable discrete-epoch simulation engine: a population of typed
//! cells occupies the nodes of a graph topology, and independently
//! loadable plugins — Actions, Cells, Topologies — observe or mutate that
//! population once per simulation epoch.
//!
//! ## Quick Start
//!
//! ```rust
//! use demes::prelude::*;
//!
//! // Assemble the plugin catalog
//! let mut catalog = PluginCatalog::new();
//! register_builtins(&mut catalog).unwrap();
//! register_stock_plugins(&mut catalog).unwrap();
//!
//! // Configure a small experiment
//! let mut config = Config::new();
//! config.set("experiment", "epochs", 10);
//! config.set("experiment", "max_types", 3);
//! config.set("experiment", "seed", 1);
//! config.set("experiment", "actions", "type_count");
//! config.set("lattice", "width", 8);
//! config.set("lattice", "height", 8);
//!
//! // Run it
//! let data_dir = std::env::temp_dir().join("demes-doc-example");
//! let mut experiment = Experiment::new(config, &catalog, data_dir).unwrap();
//! experiment.run_to_completion().unwrap();
//! assert_eq!(experiment.current_epoch(), 10);
//! ```
//!
//! ## Architecture
//!
//! demes is organized into several crates:
//!
//! - [`demes_core`] - Version grammar, plugin registry, schedule windows,
//!   cluster analysis, and the capability traits the engine consumes
//! - [`demes_runtime`] - Experiment driver, population graph, built-in
//!   topology and cell plugins, data-file sinks
//! - [`demes_plugins`] - Stock Action plugins (type counts, transitions,
//!   clusters, graph properties, location snapshots)
//!
//! ## Key Concepts
//!
//! - **Epoch** — one discrete simulation time step
//! - **Action** — a pluggable unit of scheduled work, gated by an epoch
//!   window (`epoch_start`, `epoch_end`, `frequency`) and dispatched in
//!   priority order
//! - **Cluster** — a maximal connected same-type subgraph of the
//!   population, recomputed per analysis by flood fill
//! - **Requirement** — a named dependency plus version constraint one
//!   plugin declares on another, checked fail-fast at load time

// Re-export all subcrates
pub use demes_core as core;
pub use demes_plugins as plugins;
pub use demes_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use demes::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use demes_core::types::{CellId, CellType, Epoch, NodeRef, Position};

    // Version grammar and plugin model
    pub use demes_core::plugin::{
        PluginDescriptor, PluginKind, PluginRegistry, Requirement, ENGINE_NAME, ENGINE_VERSION,
    };
    pub use demes_core::version::{Constraint, Version, VersionOp};

    // Scheduling and actions
    pub use demes_core::action::{Action, Context, ExperimentData};
    pub use demes_core::schedule::{dispatch_order, ScheduleWindow};

    // Cluster analysis
    pub use demes_core::cluster::{ClusterAnalyzer, ClusterReport, SeedPolicy};

    // Capability traits
    pub use demes_core::config::ConfigSource;
    pub use demes_core::topology::PopulationView;

    // Error types
    pub use demes_core::error::{DemesError, Result};

    // Runtime
    pub use demes_runtime::catalog::{ActionSetup, PluginCatalog};
    pub use demes_runtime::cells::{CellRule, DriftCell};
    pub use demes_runtime::config::Config;
    pub use demes_runtime::experiment::{Experiment, ExperimentEvent, ExperimentStats};
    pub use demes_runtime::population::{Cell, Population};
    pub use demes_runtime::register_builtins;

    // Stock plugins
    pub use demes_plugins::register_stock_plugins;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
