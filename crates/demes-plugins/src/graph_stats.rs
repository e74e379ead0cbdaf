//! General-purpose measures over a population graph snapshot.
//!
//! Used by the graph-properties Action. These walk the adjacency exposed
//! by [`PopulationView`] and ignore cell types entirely.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use demes_core::topology::PopulationView;
use demes_core::types::NodeRef;

/// Degree of every node.
pub fn degrees(view: &dyn PopulationView) -> Vec<f64> {
    view.nodes()
        .into_iter()
        .map(|n| view.neighbors(n).len() as f64)
        .collect()
}

/// Average clustering coefficient over all nodes.
///
/// Nodes with fewer than two neighbors have coefficient 0 and still count
/// toward the average.
pub fn average_clustering(view: &dyn PopulationView) -> f64 {
    let nodes = view.nodes();
    if nodes.is_empty() {
        return 0.0;
    }

    let neighbor_sets: HashMap<NodeRef, HashSet<NodeRef>> = nodes
        .iter()
        .map(|&n| (n, view.neighbors(n).into_iter().collect()))
        .collect();

    let mut sum = 0.0;
    for node in &nodes {
        let neighbors: Vec<NodeRef> = neighbor_sets[node].iter().copied().collect();
        let k = neighbors.len();
        if k < 2 {
            continue;
        }
        let mut triangles = 0usize;
        for i in 0..k {
            for j in (i + 1)..k {
                if neighbor_sets[&neighbors[i]].contains(&neighbors[j]) {
                    triangles += 1;
                }
            }
        }
        sum += triangles as f64 / (k * (k - 1) / 2) as f64;
    }

    sum / nodes.len() as f64
}

/// Number of connected components (type-blind).
pub fn connected_components(view: &dyn PopulationView) -> usize {
    let mut unvisited: BTreeSet<NodeRef> = view.nodes().into_iter().collect();
    let mut components = 0;

    while let Some(&seed) = unvisited.iter().next() {
        components += 1;
        let mut stack = vec![seed];
        unvisited.remove(&seed);
        while let Some(node) = stack.pop() {
            for neighbor in view.neighbors(node) {
                if unvisited.remove(&neighbor) {
                    stack.push(neighbor);
                }
            }
        }
    }

    components
}

/// The longest shortest path in the graph, measured within components.
///
/// Quadratic in the node count — one breadth-first search per node — so
/// reporting this on large topologies is expensive.
pub fn diameter(view: &dyn PopulationView) -> usize {
    let mut best = 0;
    for start in view.nodes() {
        let mut distance: HashMap<NodeRef, usize> = HashMap::new();
        distance.insert(start, 0);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            let d = distance[&node];
            best = best.max(d);
            for neighbor in view.neighbors(node) {
                if !distance.contains_key(&neighbor) {
                    distance.insert(neighbor, d + 1);
                    queue.push_back(neighbor);
                }
            }
        }
    }
    best
}
