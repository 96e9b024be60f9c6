#![cfg(test)]

use std::collections::BTreeSet;

use quickcheck::{Arbitrary, Gen};

use crate::{Directed, Edge, NodeId, Undirected, WeightedGraph};

/// A small random edge list with integer weights, so results can be checked
/// exactly against `pathfinding`.  Parallel edges and self loops occur.
#[derive(Debug, Clone)]
pub struct ArbGraph {
    pub num_nodes: usize,
    pub edges: Vec<(NodeId, NodeId, u32)>,
}

impl Arbitrary for ArbGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_nodes = usize::arbitrary(g) % 16; // Limit size for testing
        let num_edges = usize::arbitrary(g) % 40;
        let mut edges = Vec::with_capacity(num_edges);
        if num_nodes > 0 {
            for _ in 0..num_edges {
                let from = usize::arbitrary(g) % num_nodes;
                let to = usize::arbitrary(g) % num_nodes;
                let weight = u32::arbitrary(g) % 20 + 1;
                edges.push((from, to, weight));
            }
        }
        ArbGraph { num_nodes, edges }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let num_nodes = self.num_nodes;
        Box::new(self.edges.shrink().map(move |edges| ArbGraph { num_nodes, edges }))
    }
}

impl ArbGraph {
    /// Directed unweighted view, edges in list order.
    pub fn adjacency(&self) -> Vec<Vec<NodeId>> {
        let mut adjacency = vec![Vec::new(); self.num_nodes];
        for &(from, to, _) in &self.edges {
            adjacency[from].push(to);
        }
        adjacency
    }

    pub fn edge_list(&self) -> Vec<Edge> {
        self.edges
            .iter()
            .map(|&(from, to, weight)| Edge::new(from, to, weight as f64))
            .collect()
    }

    pub fn directed(&self) -> WeightedGraph<Directed> {
        WeightedGraph::from_edges(self.num_nodes, self.float_edges())
    }

    pub fn undirected(&self) -> WeightedGraph<Undirected> {
        WeightedGraph::from_edges(self.num_nodes, self.float_edges())
    }

    fn float_edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.edges
            .iter()
            .map(|&(from, to, weight)| (from, to, weight as f64))
    }
}

/// Normalizes a list of components for order-insensitive comparison.
pub fn component_set<I, C>(components: I) -> BTreeSet<BTreeSet<NodeId>>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = NodeId>,
{
    components
        .into_iter()
        .map(|component| component.into_iter().collect())
        .collect()
}
