//! The population — typed cells on a graph topology.
//!
//! Nodes of an undirected petgraph graph each hold one [`Cell`]. The
//! population tracks per-type counts and the per-epoch type-transition
//! matrix as cells change type, and exposes the whole structure read-only
//! through [`PopulationView`] for analysis code.

use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use demes_core::action::ExperimentData;
use demes_core::error::{DemesError, Result};
use demes_core::topology::PopulationView;
use demes_core::types::{CellId, CellType, NodeRef, Position};

/// A cell occupying one node of the population graph.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    pub id: CellId,
    pub cell_type: CellType,
    pub position: Position,
}

/// The population graph and its derived per-epoch data.
#[derive(Debug)]
pub struct Population {
    graph: UnGraph<Cell, ()>,
    data: ExperimentData,
    max_types: usize,
    next_cell_id: u64,
}

impl Population {
    pub fn new(max_types: usize) -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            data: ExperimentData::new(max_types),
            max_types,
            next_cell_id: 0,
        }
    }

    /// Place a new cell of `cell_type` at `position` on a fresh node.
    pub fn add_cell(&mut self, cell_type: CellType, position: Position) -> NodeRef {
        let cell = Cell {
            id: CellId(self.next_cell_id),
            cell_type,
            position,
        };
        self.next_cell_id += 1;
        self.data.type_counts[cell_type] += 1;
        NodeRef(self.graph.add_node(cell).index())
    }

    /// Connect two nodes. Adding an existing edge again is a no-op.
    pub fn connect(&mut self, a: NodeRef, b: NodeRef) -> Result<()> {
        let (a, b) = (self.index(a)?, self.index(b)?);
        self.graph.update_edge(a, b, ());
        Ok(())
    }

    pub fn cell(&self, node: NodeRef) -> Result<&Cell> {
        self.graph
            .node_weight(NodeIndex::new(node.0))
            .ok_or_else(|| DemesError::node_not_found(node.0))
    }

    /// Change the type of the cell at `node`, recording the transition in
    /// this epoch's transition matrix. Setting the current type again is
    /// recorded as a self-transition, matching the transition reports.
    pub fn set_cell_type(&mut self, node: NodeRef, cell_type: CellType) -> Result<()> {
        let index = self.index(node)?;
        let cell = self
            .graph
            .node_weight_mut(index)
            .ok_or_else(|| DemesError::node_not_found(node.0))?;
        let previous = cell.cell_type;
        cell.cell_type = cell_type;
        self.data.type_counts[previous] -= 1;
        self.data.type_counts[cell_type] += 1;
        self.data.record_transition(previous, cell_type);
        Ok(())
    }

    /// Reset per-epoch data at the start of a new epoch.
    pub fn begin_epoch(&mut self) {
        self.data.clear_transitions();
    }

    pub fn data(&self) -> &ExperimentData {
        &self.data
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn index(&self, node: NodeRef) -> Result<NodeIndex> {
        let index = NodeIndex::new(node.0);
        if self.graph.node_weight(index).is_some() {
            Ok(index)
        } else {
            Err(DemesError::node_not_found(node.0))
        }
    }
}

impl PopulationView for Population {
    fn len(&self) -> usize {
        self.graph.node_count()
    }

    fn nodes(&self) -> Vec<NodeRef> {
        self.graph
            .node_indices()
            .map(|i| NodeRef(i.index()))
            .collect()
    }

    fn neighbors(&self, node: NodeRef) -> Vec<NodeRef> {
        self.graph
            .neighbors(NodeIndex::new(node.0))
            .map(|i| NodeRef(i.index()))
            .collect()
    }

    fn cell_type(&self, node: NodeRef) -> CellType {
        self.graph[NodeIndex::new(node.0)].cell_type
    }

    fn cell_id(&self, node: NodeRef) -> CellId {
        self.graph[NodeIndex::new(node.0)].id
    }

    fn position(&self, node: NodeRef) -> Position {
        self.graph[NodeIndex::new(node.0)].position
    }

    fn max_types(&self) -> usize {
        self.max_types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_type_changes() {
        let mut pop = Population::new(3);
        let a = pop.add_cell(0, Position::new(0.0, 0.0));
        let _b = pop.add_cell(0, Position::new(1.0, 0.0));
        let _c = pop.add_cell(2, Position::new(2.0, 0.0));
        assert_eq!(pop.data().type_counts, vec![2, 0, 1]);

        pop.set_cell_type(a, 1).unwrap();
        assert_eq!(pop.data().type_counts, vec![1, 1, 1]);
        assert_eq!(pop.data().transitions[0][1], 1);

        pop.begin_epoch();
        assert_eq!(pop.data().transitions[0][1], 0);
        // Counts persist across epochs; only transitions reset.
        assert_eq!(pop.data().type_counts, vec![1, 1, 1]);
    }

    #[test]
    fn unknown_nodes_are_graph_errors() {
        let mut pop = Population::new(2);
        let a = pop.add_cell(0, Position::new(0.0, 0.0));
        let ghost = NodeRef(99);
        assert!(pop.cell(ghost).is_err());
        assert!(pop.connect(a, ghost).is_err());
        assert!(pop.set_cell_type(ghost, 1).is_err());
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut pop = Population::new(1);
        let a = pop.add_cell(0, Position::new(0.0, 0.0));
        let b = pop.add_cell(0, Position::new(1.0, 0.0));
        pop.connect(a, b).unwrap();
        pop.connect(b, a).unwrap();
        assert_eq!(pop.edge_count(), 1);
        assert_eq!(pop.neighbors(a), vec![b]);
    }
}
