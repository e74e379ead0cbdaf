//! Shared types used across all demes crates.

use serde::{Deserialize, Serialize};

/// One discrete simulation time step.
///
/// Epochs are counted from 0. The value -1 is used in schedule windows to
/// mean "unbounded", so epochs are signed.
pub type Epoch = i64;

/// A cell type identifier, drawn from `[0, max_types)`.
pub type CellType = usize;

/// A handle to a node in the population graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef(pub usize);

/// Unique identifier for a cell in the population.
///
/// Cells keep their identity when they change type or when the topology
/// is rebuilt; the node they occupy may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub u64);

/// A position in the topology's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}
