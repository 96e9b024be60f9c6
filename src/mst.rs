//! Minimum spanning trees (Kruskal and Prim).
//!
//! Both return a spanning forest without complaint when the graph is
//! disconnected: Kruskal covers every component, Prim only the component of
//! node 0.

use crate::{
    adjacency::WeightedAdjacency,
    priority_queue::PriorityQueue,
    tracing_support::{debug, info_span, trace},
    union_find::UnionFind,
    weighted_graph::Edge,
};

/// Sums the weights of `edges`.
pub fn total_weight(edges: &[Edge]) -> f64 {
    edges.iter().map(|edge| edge.weight).sum()
}

/// Builds a minimum spanning forest by scanning the edges in ascending
/// weight order and accepting every edge that joins two components.
///
/// The sort is stable, so edges of equal weight are considered in input
/// order.  Stops early once `num_nodes - 1` edges are accepted.
///
/// # Panics
///
/// Panics if an edge endpoint is not in `0..num_nodes`.
pub fn kruskal(edges: &[Edge], num_nodes: usize) -> Vec<Edge> {
    let _span = info_span!("kruskal", num_nodes, num_edges = edges.len()).entered();
    let mut sorted = edges.to_vec();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut components = UnionFind::new(num_nodes);
    let mut tree = Vec::with_capacity(num_nodes.saturating_sub(1));
    for edge in sorted {
        if tree.len() + 1 >= num_nodes {
            break;
        }
        if components.union(edge.from, edge.to) {
            tree.push(edge);
        } else {
            trace!(from = edge.from, to = edge.to, "rejected cycle-forming edge");
        }
    }
    debug!(accepted = tree.len(), "kruskal finished");
    tree
}

/// Grows a minimum spanning tree from node 0.
///
/// Candidate edges are queued by weight alone.  When a node is reached, the
/// accepted edge is recovered by scanning the already visited nodes in
/// ascending id order for the first edge to it with exactly the popped
/// weight; with duplicate weights this may be a different edge of the same
/// weight than the one that was queued.
pub fn prim<A: WeightedAdjacency + ?Sized>(adjacency: &A) -> Vec<Edge> {
    let n = adjacency.num_nodes();
    let _span = info_span!("prim", num_nodes = n).entered();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut tree = Vec::with_capacity(n - 1);
    let mut queue = PriorityQueue::new();

    visited[0] = true;
    for (to, weight) in adjacency.weighted_neighbors(0) {
        queue.push(to, weight);
    }

    while tree.len() < n - 1 {
        let Some(item) = queue.pop_fresh(|item| visited[item.node]) else {
            break;
        };
        let node = item.node;
        let weight = item.priority;
        visited[node] = true;

        let from = (0..n)
            .filter(|&candidate| candidate != node && visited[candidate])
            .find(|&candidate| {
                adjacency
                    .weighted_neighbors(candidate)
                    .any(|(to, w)| to == node && w == weight)
            });
        if let Some(from) = from {
            tree.push(Edge::new(from, node, weight));
        }

        for (to, weight) in adjacency.weighted_neighbors(node) {
            if !visited[to] {
                queue.push(to, weight);
            }
        }
    }
    debug!(accepted = tree.len(), "prim finished");
    tree
}
