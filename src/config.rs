use std::ops::Range;

use crate::weighted_graph::Position;

/// Parameters for [`WeightedGraph::random`](crate::WeightedGraph::random).
///
/// Nodes are laid out row by row on a grid; edges are proposed between
/// uniformly chosen node pairs and kept unless they would form a self loop or
/// duplicate an existing edge.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGraphConfig {
    /// Number of nodes to create.
    pub num_nodes: usize,
    /// Edge proposals per node; the graph receives at most
    /// `num_nodes * edge_attempts_per_node` edges.
    pub edge_attempts_per_node: usize,
    /// Half-open range edge weights are drawn from.  Must not be empty.
    pub weight_range: Range<f64>,
    /// Nodes per grid row.
    pub grid_columns: usize,
    /// Position of node 0.
    pub grid_origin: Position,
    /// Distance between neighboring grid cells.
    pub grid_spacing: f64,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            num_nodes: 10,
            edge_attempts_per_node: 2,
            weight_range: 1.0..10.0,
            grid_columns: 5,
            grid_origin: Position::new(60.0, 60.0),
            grid_spacing: 80.0,
        }
    }
}

impl RandomGraphConfig {
    /// Returns a copy of the configuration with a different node count.
    pub fn with_num_nodes(self, num_nodes: usize) -> Self {
        Self { num_nodes, ..self }
    }

    /// Gets the grid position of the node with the given index.
    pub fn grid_position(&self, index: usize) -> Position {
        let columns = self.grid_columns.max(1);
        Position::new(
            self.grid_origin.x + (index % columns) as f64 * self.grid_spacing,
            self.grid_origin.y + (index / columns) as f64 * self.grid_spacing,
        )
    }
}
