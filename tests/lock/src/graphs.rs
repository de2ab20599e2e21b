//! Graph builders for lock tests, including small seeded random graphs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use flowline_kernel::carrier::graph::{GraphV1, NodeRecordV1};

/// Build a record from string slices.
#[must_use]
pub fn record(label: &str, rate: u32, neighbors: &[&str]) -> NodeRecordV1 {
    NodeRecordV1 {
        label: label.into(),
        rate,
        neighbors: neighbors.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// Build a graph from `(label, rate, neighbors)` rows.
///
/// # Panics
///
/// Panics if the rows do not form a valid graph.
#[must_use]
pub fn graph(rows: &[(&str, u32, &[&str])]) -> GraphV1 {
    let records = rows
        .iter()
        .map(|(label, rate, neighbors)| record(label, *rate, neighbors))
        .collect();
    GraphV1::from_records(records).unwrap_or_else(|e| panic!("bad test graph: {e}"))
}

/// Label of the `i`-th random-graph node.
#[must_use]
pub fn label(i: usize) -> String {
    format!("N{i}")
}

/// A seeded random graph on `nodes` nodes, start node `N0`.
///
/// A random spanning tree keeps every node reachable from `N0` (edges both
/// ways); extra one-way edges are sprinkled on top. About a third of the
/// nodes have rate zero.
///
/// # Panics
///
/// Panics if `nodes` or `max_rate` is zero.
#[must_use]
pub fn random_graph(seed: u64, nodes: usize, max_rate: u32) -> GraphV1 {
    assert!(nodes > 0, "random graph needs at least one node");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes];

    for i in 1..nodes {
        let parent = rng.random_range(0..i);
        adjacency[i].push(parent);
        adjacency[parent].push(i);
    }
    for from in 0..nodes {
        for to in 0..nodes {
            if from != to && !adjacency[from].contains(&to) && rng.random_bool(0.15) {
                adjacency[from].push(to);
            }
        }
    }

    let records = adjacency
        .iter()
        .enumerate()
        .map(|(i, neighbors)| {
            let rate = if rng.random_bool(0.33) {
                0
            } else {
                rng.random_range(1..=max_rate)
            };
            NodeRecordV1 {
                label: label(i),
                rate,
                neighbors: neighbors.iter().map(|&n| label(n)).collect(),
            }
        })
        .collect();
    GraphV1::from_records(records).unwrap_or_else(|e| panic!("bad random graph: {e}"))
}

/// `random_graph` with every rate forced to zero.
///
/// # Panics
///
/// As [`random_graph`].
#[must_use]
pub fn zero_reward_graph(seed: u64, nodes: usize) -> GraphV1 {
    let source = random_graph(seed, nodes, 1);
    let records = source
        .nodes()
        .map(|n| NodeRecordV1 {
            label: n.label.clone(),
            rate: 0,
            neighbors: n
                .neighbors
                .iter()
                .filter_map(|&id| source.label(id).map(str::to_string))
                .collect(),
        })
        .collect();
    GraphV1::from_records(records).unwrap_or_else(|e| panic!("bad zero graph: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_graphs_are_reproducible() {
        assert_eq!(random_graph(7, 5, 9), random_graph(7, 5, 9));
        assert_ne!(random_graph(7, 5, 9), random_graph(8, 5, 9));
    }

    #[test]
    fn zero_reward_graph_keeps_shape() {
        let g = zero_reward_graph(3, 5);
        assert_eq!(g.len(), 5);
        assert_eq!(g.total_rate(), 0);
    }
}
