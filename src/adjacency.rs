//! Adjacency views consumed by the algorithms.
//!
//! Algorithms never see a graph type directly; they read one of these views.
//! Whether a view is treated as directed or undirected is up to the caller:
//! an undirected [`WeightedGraph`](crate::WeightedGraph) already stores both
//! directions, so the same value serves traversal, MST and shortest paths as
//! well as topological sort and SCC decomposition.

use crate::NodeId;

/// A read-only, unweighted adjacency view over the dense ids `0..num_nodes()`.
pub trait Adjacency {
    /// Gets the number of nodes in the view.
    fn num_nodes(&self) -> usize;

    /// Gets the neighbors of a node in stored order.  Neighbors may repeat if
    /// the underlying data contains parallel edges.
    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_;

    /// Returns true if the view contains no nodes.
    fn is_empty(&self) -> bool {
        self.num_nodes() == 0
    }
}

/// An adjacency view whose entries carry edge weights.
pub trait WeightedAdjacency: Adjacency {
    /// Gets `(neighbor, weight)` pairs of a node in stored order.
    fn weighted_neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_;
}

impl Adjacency for [Vec<NodeId>] {
    fn num_nodes(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self[node].iter().copied()
    }
}

impl Adjacency for Vec<Vec<NodeId>> {
    fn num_nodes(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self[node].iter().copied()
    }
}

impl Adjacency for [Vec<(NodeId, f64)>] {
    fn num_nodes(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self[node].iter().map(|&(to, _)| to)
    }
}

impl WeightedAdjacency for [Vec<(NodeId, f64)>] {
    fn weighted_neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self[node].iter().copied()
    }
}

impl Adjacency for Vec<Vec<(NodeId, f64)>> {
    fn num_nodes(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self[node].iter().map(|&(to, _)| to)
    }
}

impl WeightedAdjacency for Vec<Vec<(NodeId, f64)>> {
    fn weighted_neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self[node].iter().copied()
    }
}

/// Builds the transposed view: for every `from -> to` in `adjacency`, the
/// result holds `to -> from`.  Lists are filled in ascending `from` order.
pub fn transpose<A: Adjacency + ?Sized>(adjacency: &A) -> Vec<Vec<NodeId>> {
    let mut transposed = vec![Vec::new(); adjacency.num_nodes()];
    for from in 0..adjacency.num_nodes() {
        for to in adjacency.neighbors(from) {
            transposed[to].push(from);
        }
    }
    transposed
}
