use std::marker::PhantomData;

use derivative::Derivative;
use rand::Rng;

use crate::{
    adjacency::{Adjacency, WeightedAdjacency},
    config::RandomGraphConfig,
    directedness::{Directedness, Undirected},
    util::shift_down,
};

/// A dense node identifier in `0..num_nodes`.
pub type NodeId = usize;

/// A 2D position attached to every node.  Used by the A* heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two positions.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A weighted edge as supplied by the caller.  Weights are expected to be
/// non-negative for shortest path and spanning tree algorithms; this is not
/// checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

impl Edge {
    pub const fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

impl From<(NodeId, NodeId, f64)> for Edge {
    fn from((from, to, weight): (NodeId, NodeId, f64)) -> Self {
        Self::new(from, to, weight)
    }
}

/// A graph with dense node ids, node positions, and weighted edges.
///
/// The graph keeps two representations in sync: the edge list, in insertion
/// order, and a per-node adjacency list.  For [`Undirected`] graphs every
/// edge is materialized in both adjacency lists; for
/// [`Directed`](crate::Directed) graphs only in the list of its source.
///
/// # Type Parameters
/// * `D` - The directedness ([`Undirected`] or [`Directed`](crate::Directed))
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    Debug(bound = ""),
    Default(bound = ""),
    PartialEq(bound = "")
)]
pub struct WeightedGraph<D: Directedness = Undirected> {
    positions: Vec<Position>,
    adjacency: Vec<Vec<(NodeId, f64)>>,
    edges: Vec<Edge>,
    #[derivative(Debug = "ignore")]
    directedness: PhantomData<D>,
}

impl<D: Directedness> WeightedGraph<D> {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `num_nodes` isolated nodes at the origin.
    pub fn with_nodes(num_nodes: usize) -> Self {
        Self {
            positions: vec![Position::default(); num_nodes],
            adjacency: vec![Vec::new(); num_nodes],
            edges: Vec::new(),
            directedness: PhantomData,
        }
    }

    /// Creates a graph with `num_nodes` nodes and the given edges, kept
    /// verbatim and in order (parallel edges included).
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is not in `0..num_nodes`.
    pub fn from_edges(
        num_nodes: usize,
        edges: impl IntoIterator<Item = (NodeId, NodeId, f64)>,
    ) -> Self {
        let mut graph = Self::with_nodes(num_nodes);
        for edge in edges {
            let edge = Edge::from(edge);
            graph.assert_valid_node_id(edge.from);
            graph.assert_valid_node_id(edge.to);
            graph.push_edge(edge);
        }
        graph
    }

    /// Reassembles a graph from its raw parts without materializing edges
    /// again.  The caller guarantees every id is in range.
    pub(crate) fn from_parts(
        positions: Vec<Position>,
        adjacency: Vec<Vec<(NodeId, f64)>>,
        edges: Vec<Edge>,
    ) -> Self {
        debug_assert_eq!(positions.len(), adjacency.len());
        Self {
            positions,
            adjacency,
            edges,
            directedness: PhantomData,
        }
    }

    /// Generates a random graph laid out on a grid.  See
    /// [`RandomGraphConfig`] for the parameters.
    ///
    /// # Panics
    ///
    /// Panics if `config.weight_range` is empty.
    pub fn random<R: Rng + ?Sized>(config: &RandomGraphConfig, rng: &mut R) -> Self {
        let mut graph = Self::new();
        for i in 0..config.num_nodes {
            graph.add_node(config.grid_position(i));
        }
        let n = config.num_nodes;
        if n == 0 {
            return graph;
        }
        for _ in 0..n * config.edge_attempts_per_node {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            if a == b || graph.has_edge_between(a, b) {
                continue;
            }
            let weight = rng.gen_range(config.weight_range.clone());
            graph.push_edge(Edge::new(a, b, weight));
        }
        graph
    }

    /// Returns true if the graph is directed.
    pub fn is_directed(&self) -> bool {
        D::is_directed()
    }

    // Nodes

    /// Gets the number of nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Gets an iterator over all node ids in ascending order.
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.num_nodes()
    }

    /// Checks if a NodeId is valid in the graph, returning a reason if it is
    /// not.
    pub fn check_valid_node_id(&self, id: NodeId) -> Result<(), &'static str> {
        if id < self.num_nodes() {
            Ok(())
        } else {
            Err("NodeId out of range")
        }
    }

    /// Panics if the given NodeId is not valid in the graph.
    pub fn assert_valid_node_id(&self, id: NodeId) {
        if let Err(reason) = self.check_valid_node_id(id) {
            panic!("Invalid NodeId: {:?}: {}", id, reason);
        }
    }

    /// Adds a node at the given position with no edges, returning its id.
    pub fn add_node(&mut self, position: Position) -> NodeId {
        self.positions.push(position);
        self.adjacency.push(Vec::new());
        self.positions.len() - 1
    }

    /// Removes a node together with every edge touching it.  All ids greater
    /// than `id` shift down by one so ids stay dense.  Returns the removed
    /// node's position.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of the graph.
    pub fn remove_node(&mut self, id: NodeId) -> Position {
        self.assert_valid_node_id(id);
        self.edges.retain(|edge| edge.from != id && edge.to != id);
        for edge in &mut self.edges {
            edge.from = shift_down(edge.from, id);
            edge.to = shift_down(edge.to, id);
        }
        self.adjacency.remove(id);
        for neighbors in &mut self.adjacency {
            neighbors.retain(|&(to, _)| to != id);
            for (to, _) in neighbors.iter_mut() {
                *to = shift_down(*to, id);
            }
        }
        self.positions.remove(id)
    }

    /// Gets the position of a node.
    pub fn position(&self, id: NodeId) -> Position {
        self.assert_valid_node_id(id);
        self.positions[id]
    }

    /// Moves a node.
    pub fn set_position(&mut self, id: NodeId, position: Position) {
        self.assert_valid_node_id(id);
        self.positions[id] = position;
    }

    /// Gets the positions of all nodes, indexed by id.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    // Edges

    /// Gets the number of edges in the graph.  An undirected edge counts once.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Gets all edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns true if an edge connects `a` and `b`, honoring directedness.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges
            .iter()
            .any(|edge| D::connects(edge.from, edge.to, a, b))
    }

    /// Returns true if an edge joins `a` and `b` in either orientation.
    fn has_edge_between(&self, a: NodeId, b: NodeId) -> bool {
        self.edges
            .iter()
            .any(|edge| Undirected::connects(edge.from, edge.to, a, b))
    }

    /// Adds an edge unless one already connects the endpoints.  Returns true
    /// if the edge was added.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a node of the graph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> bool {
        self.assert_valid_node_id(from);
        self.assert_valid_node_id(to);
        if self.has_edge(from, to) {
            return false;
        }
        self.push_edge(Edge::new(from, to, weight));
        true
    }

    fn push_edge(&mut self, edge: Edge) {
        self.adjacency[edge.from].push((edge.to, edge.weight));
        if !D::is_directed() {
            self.adjacency[edge.to].push((edge.from, edge.weight));
        }
        self.edges.push(edge);
    }

    /// Removes the first edge connecting `a` and `b` along with its adjacency
    /// entries.  Returns false if no such edge exists.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let Some(index) = self
            .edges
            .iter()
            .position(|edge| D::connects(edge.from, edge.to, a, b))
        else {
            return false;
        };
        let edge = self.edges.remove(index);
        remove_first_neighbor(&mut self.adjacency[edge.from], edge.to);
        if !D::is_directed() {
            remove_first_neighbor(&mut self.adjacency[edge.to], edge.from);
        }
        true
    }

    // Views

    /// Gets the neighbors of a node in adjacency order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.weighted_neighbors(id).iter().map(|&(to, _)| to)
    }

    /// Gets the `(neighbor, weight)` pairs of a node in adjacency order.
    pub fn weighted_neighbors(&self, id: NodeId) -> &[(NodeId, f64)] {
        self.assert_valid_node_id(id);
        &self.adjacency[id]
    }

    /// Builds the unweighted adjacency view: `node -> [neighbor ids]`.
    pub fn adjacency(&self) -> Vec<Vec<NodeId>> {
        self.adjacency
            .iter()
            .map(|neighbors| neighbors.iter().map(|&(to, _)| to).collect())
            .collect()
    }

    /// Gets the weighted adjacency view: `node -> [(neighbor, weight)]`.
    pub fn weighted_adjacency(&self) -> &[Vec<(NodeId, f64)>] {
        &self.adjacency
    }
}

fn remove_first_neighbor(neighbors: &mut Vec<(NodeId, f64)>, target: NodeId) {
    if let Some(index) = neighbors.iter().position(|&(to, _)| to == target) {
        neighbors.remove(index);
    }
}

impl<D: Directedness> Adjacency for WeightedGraph<D> {
    fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency[node].iter().map(|&(to, _)| to)
    }
}

impl<D: Directedness> WeightedAdjacency for WeightedGraph<D> {
    fn weighted_neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency[node].iter().copied()
    }
}
