//! The population-graph capability consumed by analysis code.
//!
//! Analysis components never own the population; they borrow a read-only
//! view of its graph for the duration of one call. The view is a frozen
//! snapshot — callers must not mutate the population while a view of it is
//! live.
//!
//! This is a trait rather than a concrete type so that different runtime
//! implementations can use different graph backends.

use crate::types::{CellId, CellType, NodeRef, Position};

/// Read-only view of the population graph: nodes, adjacency, and the cell
/// occupying each node.
pub trait PopulationView {
    /// Number of nodes in the graph.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All node handles.
    fn nodes(&self) -> Vec<NodeRef>;

    /// Neighbors of `node` under graph adjacency.
    fn neighbors(&self, node: NodeRef) -> Vec<NodeRef>;

    /// The type of the cell occupying `node`, in `[0, max_types)`.
    fn cell_type(&self, node: NodeRef) -> CellType;

    /// The identity of the cell occupying `node`.
    fn cell_id(&self, node: NodeRef) -> CellId;

    /// The coordinates the topology assigned to `node`.
    fn position(&self, node: NodeRef) -> Position;

    /// Size of the closed cell-type range.
    fn max_types(&self) -> usize;
}
