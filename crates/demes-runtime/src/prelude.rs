//! demes-runtime prelude — convenient imports for common usage.
//!
//! ```rust
//! use demes_runtime::prelude::*;
//! ```

pub use crate::catalog::{ActionFactory, ActionSetup, PluginCatalog};
pub use crate::cells::{CellFactory, CellRule, DriftCell};
pub use crate::config::Config;
pub use crate::datafile::{data_path, CsvFile};
pub use crate::experiment::{Experiment, ExperimentEvent, ExperimentStats};
pub use crate::population::{Cell, Population};
pub use crate::register_builtins;
pub use crate::topology::TopologyFactory;
