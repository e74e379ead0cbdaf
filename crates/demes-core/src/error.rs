//! Error types for demes operations.
//!
//! Every failure carries the identity of what went wrong (which plugin,
//! which version, which section/parameter) so that a run aborts with a
//! precise message rather than a generic one.

use std::error::Error;
use std::fmt;

use crate::plugin::PluginKind;
use crate::version::{Constraint, Version};

/// Result type for demes operations.
pub type Result<T> = std::result::Result<T, DemesError>;

/// Errors that can occur during demes operations.
#[derive(Debug, Clone)]
pub enum DemesError {
    /// Plugin lookup and resolution errors.
    Plugin(PluginError),
    /// String parsing errors (versions, constraints, range lists).
    Parse(ParseError),
    /// Configuration errors.
    Config(ConfigError),
    /// Topology graph errors.
    Graph(GraphError),
    /// A resource was requested that has not been defined.
    ResourceNotDefined(String),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for DemesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemesError::Plugin(e) => write!(f, "{}", e),
            DemesError::Parse(e) => write!(f, "{}", e),
            DemesError::Config(e) => write!(f, "{}", e),
            DemesError::Graph(e) => write!(f, "{}", e),
            DemesError::ResourceNotDefined(name) => write!(f, "Resource '{}' not defined", name),
            DemesError::Io(msg) => write!(f, "I/O error: {}", msg),
            DemesError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for DemesError {}

impl From<std::io::Error> for DemesError {
    fn from(e: std::io::Error) -> Self {
        DemesError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DemesError {
    fn from(e: serde_json::Error) -> Self {
        DemesError::Serialization(e.to_string())
    }
}

/// Plugin lookup and resolution errors.
#[derive(Debug, Clone)]
pub enum PluginError {
    /// A plugin of unknown kind was not found.
    NotFound(String),
    /// An Action plugin was not found.
    ActionNotFound(String),
    /// A Cell plugin was not found.
    CellNotFound(String),
    /// A ResourceCell plugin was not found.
    ResourceCellNotFound(String),
    /// A Topology plugin was not found.
    TopologyNotFound(String),
    /// The plugin exists but no registered version satisfies the constraint.
    VersionNotFound { name: String, constraint: Constraint },
    /// A descriptor with this (kind, name, version) is already registered.
    DuplicateVersion {
        kind: PluginKind,
        name: String,
        version: Version,
    },
    /// A plugin requires an engine version the host engine does not satisfy.
    EngineVersion { constraint: Constraint },
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::NotFound(name) => write!(f, "Plugin '{}' not found", name),
            PluginError::ActionNotFound(name) => write!(f, "Action '{}' not found", name),
            PluginError::CellNotFound(name) => write!(f, "Cell plugin '{}' not found", name),
            PluginError::ResourceCellNotFound(name) => {
                write!(f, "ResourceCell '{}' not found", name)
            }
            PluginError::TopologyNotFound(name) => write!(f, "Topology type '{}' not found", name),
            PluginError::VersionNotFound { name, constraint } => {
                write!(f, "Plugin '{}' version {} not found", name, constraint)
            }
            PluginError::DuplicateVersion {
                kind,
                name,
                version,
            } => {
                write!(
                    f,
                    "{} plugin '{}' version {} already registered",
                    kind, name, version
                )
            }
            PluginError::EngineVersion { constraint } => {
                write!(f, "demes version {} is required", constraint)
            }
        }
    }
}

/// String parsing errors.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Not a valid `<major>.<minor>[.<patch>]` version string.
    VersionFormat(String),
    /// Not a valid version comparison operator (one of <, <=, =, >=, >).
    VersionOperator(String),
    /// Not a valid integer range list (`<int>` or `<int>-<int>`, comma-separated).
    RangeList(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::VersionFormat(s) => {
                write!(f, "Invalid version string '{}'", s)
            }
            ParseError::VersionOperator(s) => {
                write!(
                    f,
                    "Invalid version operator in '{}' (expected one of <, <=, =, >=, >)",
                    s
                )
            }
            ParseError::RangeList(s) => {
                write!(f, "Invalid integer range list '{}'", s)
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// An invalid value was given for a parameter.
    InvalidValue { section: String, parameter: String },
    /// The configuration file itself could not be understood.
    Malformed(String),
    /// Parameter values conflict with each other.
    Conflict(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { section, parameter } => {
                write!(f, "Invalid value for parameter '{}.{}'", section, parameter)
            }
            ConfigError::Malformed(msg) => write!(f, "Malformed configuration: {}", msg),
            ConfigError::Conflict(msg) => write!(f, "Configuration conflict: {}", msg),
        }
    }
}

/// Topology graph errors.
#[derive(Debug, Clone)]
pub enum GraphError {
    /// A node does not exist in the topology.
    NodeNotFound(usize),
    /// An edge does not exist in the topology.
    EdgeNotFound(usize, usize),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::NodeNotFound(id) => {
                write!(f, "Node {} does not exist in topology", id)
            }
            GraphError::EdgeNotFound(src, dest) => {
                write!(f, "Edge {}-{} does not exist in topology", src, dest)
            }
        }
    }
}

// Convenience constructors
impl DemesError {
    /// The kind-specific not-found error for a missing plugin.
    pub fn plugin_not_found(kind: PluginKind, name: impl Into<String>) -> Self {
        let name = name.into();
        let inner = match kind {
            PluginKind::Action => PluginError::ActionNotFound(name),
            PluginKind::Cell => PluginError::CellNotFound(name),
            PluginKind::ResourceCell => PluginError::ResourceCellNotFound(name),
            PluginKind::Topology => PluginError::TopologyNotFound(name),
        };
        DemesError::Plugin(inner)
    }

    pub fn version_not_found(name: impl Into<String>, constraint: Constraint) -> Self {
        DemesError::Plugin(PluginError::VersionNotFound {
            name: name.into(),
            constraint,
        })
    }

    pub fn invalid_parameter(section: impl Into<String>, parameter: impl Into<String>) -> Self {
        DemesError::Config(ConfigError::InvalidValue {
            section: section.into(),
            parameter: parameter.into(),
        })
    }

    pub fn node_not_found(id: usize) -> Self {
        DemesError::Graph(GraphError::NodeNotFound(id))
    }

    pub fn edge_not_found(src: usize, dest: usize) -> Self {
        DemesError::Graph(GraphError::EdgeNotFound(src, dest))
    }
}
