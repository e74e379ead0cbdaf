//! demes-core prelude — convenient imports for common usage.
//!
//! ```rust
//! use demes_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{CellId, CellType, Epoch, NodeRef, Position};

// Version grammar
pub use crate::version::{Constraint, Version, VersionOp};

// Plugin model
pub use crate::plugin::{
    PluginDescriptor, PluginKind, PluginRegistry, Requirement, ENGINE_NAME, ENGINE_VERSION,
};

// Scheduling
pub use crate::schedule::{dispatch_order, ScheduleWindow};

// Actions and context
pub use crate::action::{Action, Context, ExperimentData};

// Cluster analysis
pub use crate::cluster::{ClusterAnalyzer, ClusterReport, SeedPolicy, TypeClusterStats};

// Capability traits
pub use crate::config::ConfigSource;
pub use crate::topology::PopulationView;

// Auxiliary parsing
pub use crate::rangelist::parse_range_list;

// Error types
pub use crate::error::{DemesError, Result};
