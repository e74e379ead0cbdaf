//! Same-type cluster analysis of the population graph.
//!
//! A cluster is a maximal set of nodes mutually reachable through edges
//! whose endpoints carry cells of equal type. The clusters of one graph
//! snapshot partition its node set: every node lands in exactly one
//! cluster. The analyzer recomputes the partition from scratch on every
//! call by flood-filling from seed nodes until no node is left unvisited;
//! which partition *labeling* comes out depends on seed order, but the
//! per-type counts and sizes do not.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::stats::{mean, std_dev};
use crate::topology::PopulationView;
use crate::types::NodeRef;

/// How the analyzer picks the next seed among unvisited nodes.
///
/// Correctness does not depend on the choice; the policy is injectable so
/// tests can run deterministically while simulations keep uniform random
/// selection.
pub enum SeedPolicy {
    /// Always the smallest unvisited node handle.
    FirstUnvisited,
    /// Uniformly random among unvisited nodes.
    Random(StdRng),
}

impl SeedPolicy {
    pub fn random() -> Self {
        SeedPolicy::Random(StdRng::from_entropy())
    }

    pub fn random_seeded(seed: u64) -> Self {
        SeedPolicy::Random(StdRng::seed_from_u64(seed))
    }

    fn pick(&mut self, unvisited: &BTreeSet<NodeRef>) -> NodeRef {
        match self {
            SeedPolicy::FirstUnvisited => *unvisited.iter().next().expect("unvisited is non-empty"),
            SeedPolicy::Random(rng) => {
                let index = rng.gen_range(0..unvisited.len());
                *unvisited
                    .iter()
                    .nth(index)
                    .expect("index is within unvisited")
            }
        }
    }
}

/// Cluster statistics for one cell type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeClusterStats {
    pub clusters: usize,
    pub size_mean: f64,
    pub size_std: f64,
}

/// Cluster statistics for one graph snapshot: totals over all clusters
/// plus a per-type breakdown. Types with zero clusters report count 0 and
/// both statistics 0.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub total_clusters: usize,
    pub total_size_mean: f64,
    pub total_size_std: f64,
    pub per_type: Vec<TypeClusterStats>,
}

impl ClusterReport {
    /// Column names of the report's data-sink schema, in row order.
    pub fn columns(max_types: usize) -> Vec<String> {
        let mut names = vec![
            "total_clusters".to_string(),
            "total_size_mean".to_string(),
            "total_size_std".to_string(),
        ];
        for t in 0..max_types {
            names.push(format!("{}_clusters", t));
            names.push(format!("{}_size_mean", t));
            names.push(format!("{}_size_std", t));
        }
        names
    }

    /// The report rendered as one data row matching [`Self::columns`].
    pub fn row(&self) -> Vec<String> {
        let mut row = vec![
            self.total_clusters.to_string(),
            self.total_size_mean.to_string(),
            self.total_size_std.to_string(),
        ];
        for stats in &self.per_type {
            row.push(stats.clusters.to_string());
            row.push(stats.size_mean.to_string());
            row.push(stats.size_std.to_string());
        }
        row
    }
}

/// Flood-fill partitioner over a frozen population snapshot.
pub struct ClusterAnalyzer {
    policy: SeedPolicy,
}

impl Default for ClusterAnalyzer {
    fn default() -> Self {
        Self::new(SeedPolicy::random())
    }
}

impl ClusterAnalyzer {
    pub fn new(policy: SeedPolicy) -> Self {
        Self { policy }
    }

    /// Partition the view into same-type clusters and summarize them.
    ///
    /// Every node and edge is inspected at most once: a node leaves
    /// `unvisited` the first time the traversal reaches it and is never
    /// revisited, so the whole run is O(V + E).
    pub fn analyze(&mut self, view: &dyn PopulationView) -> ClusterReport {
        let max_types = view.max_types();
        let mut unvisited: BTreeSet<NodeRef> = view.nodes().into_iter().collect();
        let mut sizes_by_type: Vec<Vec<f64>> = vec![Vec::new(); max_types];
        let mut all_sizes: Vec<f64> = Vec::new();

        while !unvisited.is_empty() {
            let seed = self.policy.pick(&unvisited);
            let cluster_type = view.cell_type(seed);

            // Iterative traversal; visit order does not matter, only full
            // same-type reachability from the seed.
            let mut stack = vec![seed];
            unvisited.remove(&seed);
            let mut size = 0usize;

            while let Some(node) = stack.pop() {
                size += 1;
                for neighbor in view.neighbors(node) {
                    if view.cell_type(neighbor) == cluster_type && unvisited.remove(&neighbor) {
                        stack.push(neighbor);
                    }
                }
            }

            sizes_by_type[cluster_type].push(size as f64);
            all_sizes.push(size as f64);
        }

        ClusterReport {
            total_clusters: all_sizes.len(),
            total_size_mean: mean(&all_sizes),
            total_size_std: std_dev(&all_sizes),
            per_type: sizes_by_type
                .iter()
                .map(|sizes| TypeClusterStats {
                    clusters: sizes.len(),
                    size_mean: mean(sizes),
                    size_std: std_dev(sizes),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellId, CellType, Position};

    /// Minimal adjacency-list population for tests.
    struct TestPopulation {
        types: Vec<CellType>,
        adjacency: Vec<Vec<usize>>,
        max_types: usize,
    }

    impl TestPopulation {
        fn new(max_types: usize, types: Vec<CellType>, edges: &[(usize, usize)]) -> Self {
            let mut adjacency = vec![Vec::new(); types.len()];
            for &(a, b) in edges {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
            Self {
                types,
                adjacency,
                max_types,
            }
        }
    }

    impl PopulationView for TestPopulation {
        fn len(&self) -> usize {
            self.types.len()
        }

        fn nodes(&self) -> Vec<NodeRef> {
            (0..self.types.len()).map(NodeRef).collect()
        }

        fn neighbors(&self, node: NodeRef) -> Vec<NodeRef> {
            self.adjacency[node.0].iter().copied().map(NodeRef).collect()
        }

        fn cell_type(&self, node: NodeRef) -> CellType {
            self.types[node.0]
        }

        fn cell_id(&self, node: NodeRef) -> CellId {
            CellId(node.0 as u64)
        }

        fn position(&self, node: NodeRef) -> Position {
            Position::new(node.0 as f64, 0.0)
        }

        fn max_types(&self) -> usize {
            self.max_types
        }
    }

    #[test]
    fn empty_graph_reports_zeroes() {
        let pop = TestPopulation::new(2, vec![], &[]);
        let report = ClusterAnalyzer::new(SeedPolicy::FirstUnvisited).analyze(&pop);
        assert_eq!(report.total_clusters, 0);
        assert_eq!(report.total_size_mean, 0.0);
        assert_eq!(report.total_size_std, 0.0);
        for stats in &report.per_type {
            assert_eq!(stats.clusters, 0);
            assert_eq!(stats.size_mean, 0.0);
            assert_eq!(stats.size_std, 0.0);
        }
    }

    #[test]
    fn two_disconnected_same_type_triangles() {
        let pop = TestPopulation::new(
            1,
            vec![0; 6],
            &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)],
        );
        let report = ClusterAnalyzer::new(SeedPolicy::FirstUnvisited).analyze(&pop);
        assert_eq!(report.total_clusters, 2);
        assert_eq!(report.total_size_mean, 3.0);
        assert_eq!(report.total_size_std, 0.0);
        assert_eq!(report.per_type[0].clusters, 2);
        assert_eq!(report.per_type[0].size_mean, 3.0);
        assert_eq!(report.per_type[0].size_std, 0.0);
    }

    #[test]
    fn type_boundary_splits_a_connected_path() {
        // 0-1-2-3 path, types [0, 0, 1, 1]: two clusters of size 2.
        let pop = TestPopulation::new(2, vec![0, 0, 1, 1], &[(0, 1), (1, 2), (2, 3)]);
        let report = ClusterAnalyzer::new(SeedPolicy::FirstUnvisited).analyze(&pop);
        assert_eq!(report.total_clusters, 2);
        assert_eq!(report.per_type[0].clusters, 1);
        assert_eq!(report.per_type[0].size_mean, 2.0);
        assert_eq!(report.per_type[1].clusters, 1);
        assert_eq!(report.per_type[1].size_mean, 2.0);
    }

    #[test]
    fn same_type_island_behind_a_foreign_bridge_is_separate() {
        // 0-1-2 path, types [0, 1, 0]: node 2 is type-0 but only reachable
        // through type-1 node 1, so it forms its own cluster.
        let pop = TestPopulation::new(2, vec![0, 1, 0], &[(0, 1), (1, 2)]);
        let report = ClusterAnalyzer::new(SeedPolicy::FirstUnvisited).analyze(&pop);
        assert_eq!(report.total_clusters, 3);
        assert_eq!(report.per_type[0].clusters, 2);
        assert_eq!(report.per_type[1].clusters, 1);
    }

    #[test]
    fn partition_is_complete_regardless_of_seed_policy() {
        // A 4x4 lattice with a checkered-ish type layout. The partition
        // labeling may differ between policies; the totals may not.
        let n = 16;
        let types: Vec<CellType> = (0..n).map(|i| (i / 3) % 3).collect();
        let mut edges = Vec::new();
        for row in 0..4 {
            for col in 0..4 {
                let i = row * 4 + col;
                if col + 1 < 4 {
                    edges.push((i, i + 1));
                }
                if row + 1 < 4 {
                    edges.push((i, i + 4));
                }
            }
        }
        let pop = TestPopulation::new(3, types, &edges);

        let deterministic = ClusterAnalyzer::new(SeedPolicy::FirstUnvisited).analyze(&pop);
        for seed in [1u64, 7, 42] {
            let random = ClusterAnalyzer::new(SeedPolicy::random_seeded(seed)).analyze(&pop);
            assert_eq!(random.total_clusters, deterministic.total_clusters);
            assert_eq!(random.total_size_mean, deterministic.total_size_mean);
            for t in 0..3 {
                assert_eq!(random.per_type[t].clusters, deterministic.per_type[t].clusters);
                assert_eq!(
                    random.per_type[t].size_mean,
                    deterministic.per_type[t].size_mean
                );
            }
        }

        // Sizes sum to the node count: the clusters partition the graph.
        let total_size = deterministic.total_size_mean * deterministic.total_clusters as f64;
        assert!((total_size - n as f64).abs() < 1e-9);
    }

    #[test]
    fn report_row_matches_columns() {
        let pop = TestPopulation::new(2, vec![0, 1], &[(0, 1)]);
        let report = ClusterAnalyzer::new(SeedPolicy::FirstUnvisited).analyze(&pop);
        let columns = ClusterReport::columns(2);
        let row = report.row();
        assert_eq!(columns.len(), row.len());
        assert_eq!(columns[0], "total_clusters");
        assert_eq!(columns[3], "0_clusters");
        assert_eq!(columns[8], "1_size_std");
        assert_eq!(row[0], "2");
    }
}
