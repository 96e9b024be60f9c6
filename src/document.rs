//! The persisted form of a graph.
//!
//! A [`GraphDocument`] is a plain serde mirror of a [`WeightedGraph`] using
//! the PascalCase field names of saved graph files:
//!
//! ```json
//! {
//!   "Nodes": [{ "X": 60, "Y": 60, "Neighbors": [1], "Weights": [2.5] }],
//!   "Edges": [[0, 1]],
//!   "WeightedEdges": [{ "From": 0, "To": 1, "Weight": 2.5 }]
//! }
//! ```
//!
//! Missing or `null` lists read as empty, and a neighbor without a matching
//! weight gets weight 1.  Neighbor lists are kept verbatim, so a document
//! describes the adjacency exactly whether it was saved from a directed or an
//! undirected graph.

use std::io::{Read, Write};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    NodeId, Result,
    directedness::Directedness,
    error::Error,
    weighted_graph::{Edge, Position, WeightedGraph},
};

/// Weight assumed for a neighbor listed without one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GraphDocument {
    #[serde(default, deserialize_with = "nullable")]
    pub nodes: Vec<NodeDocument>,
    #[serde(default, deserialize_with = "nullable")]
    pub edges: Vec<[NodeId; 2]>,
    #[serde(default, deserialize_with = "nullable")]
    pub weighted_edges: Vec<EdgeDocument>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeDocument {
    pub x: f64,
    pub y: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub neighbors: Vec<NodeId>,
    #[serde(default, deserialize_with = "nullable")]
    pub weights: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EdgeDocument {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl GraphDocument {
    pub fn from_graph<D: Directedness>(graph: &WeightedGraph<D>) -> Self {
        let nodes = graph
            .positions()
            .iter()
            .zip(graph.weighted_adjacency())
            .map(|(position, neighbors)| NodeDocument {
                x: position.x,
                y: position.y,
                neighbors: neighbors.iter().map(|&(to, _)| to).collect(),
                weights: neighbors.iter().map(|&(_, weight)| weight).collect(),
            })
            .collect();
        let edges = graph.edges().iter().map(|edge| [edge.from, edge.to]).collect();
        let weighted_edges = graph
            .edges()
            .iter()
            .map(|edge| EdgeDocument {
                from: edge.from,
                to: edge.to,
                weight: edge.weight,
            })
            .collect();
        Self {
            nodes,
            edges,
            weighted_edges,
        }
    }

    /// Rebuilds the graph.  The edge list comes from `WeightedEdges`, or from
    /// `Edges` if a document has no weighted edges, with each weight looked up
    /// in the source node's neighbor list.
    ///
    /// Fails with [`Error::InvalidDocument`] if any id is out of range.
    pub fn into_graph<D: Directedness>(self) -> Result<WeightedGraph<D>> {
        let num_nodes = self.nodes.len();
        let check = |id: NodeId, what: &str| {
            if id < num_nodes {
                Ok(id)
            } else {
                Err(Error::InvalidDocument(format!(
                    "{what} refers to node {id} but there are only {num_nodes} nodes"
                )))
            }
        };

        let mut positions = Vec::with_capacity(num_nodes);
        let mut adjacency = Vec::with_capacity(num_nodes);
        for node in &self.nodes {
            positions.push(Position::new(node.x, node.y));
            let neighbors = node
                .neighbors
                .iter()
                .enumerate()
                .map(|(i, &to)| -> Result<(NodeId, f64)> {
                    let weight = node.weights.get(i).copied().unwrap_or(DEFAULT_WEIGHT);
                    Ok((check(to, "a neighbor list")?, weight))
                })
                .collect::<Result<Vec<_>>>()?;
            adjacency.push(neighbors);
        }

        let edges = if self.weighted_edges.is_empty() {
            self.edges
                .iter()
                .map(|&[from, to]| -> Result<Edge> {
                    let from = check(from, "an edge")?;
                    let to = check(to, "an edge")?;
                    let weight = adjacency[from]
                        .iter()
                        .find(|&&(neighbor, _)| neighbor == to)
                        .map_or(DEFAULT_WEIGHT, |&(_, weight)| weight);
                    Ok(Edge::new(from, to, weight))
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            self.weighted_edges
                .iter()
                .map(|edge| -> Result<Edge> {
                    Ok(Edge::new(
                        check(edge.from, "a weighted edge")?,
                        check(edge.to, "a weighted edge")?,
                        edge.weight,
                    ))
                })
                .collect::<Result<Vec<_>>>()?
        };

        Ok(WeightedGraph::from_parts(positions, adjacency, edges))
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl<D: Directedness> From<&WeightedGraph<D>> for GraphDocument {
    fn from(graph: &WeightedGraph<D>) -> Self {
        Self::from_graph(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Directed, Undirected};

    fn sample() -> WeightedGraph {
        let mut graph = WeightedGraph::new();
        graph.add_node(Position::new(60.0, 60.0));
        graph.add_node(Position::new(140.0, 60.0));
        graph.add_node(Position::new(60.0, 140.0));
        graph.add_edge(0, 1, 2.5);
        graph.add_edge(2, 0, 4.0);
        graph
    }

    #[test]
    fn test_graph_survives_json() {
        let graph = sample();
        let json = GraphDocument::from_graph(&graph).to_json_string().unwrap();
        let restored = GraphDocument::from_json_str(&json)
            .unwrap()
            .into_graph::<Undirected>()
            .unwrap();
        assert_eq!(restored, graph);
    }

    #[test]
    fn test_field_names() {
        let value = serde_json::to_value(GraphDocument::from(&sample())).unwrap();
        assert_eq!(value["Nodes"][0]["X"], 60.0);
        assert_eq!(value["Nodes"][0]["Neighbors"], serde_json::json!([1, 2]));
        assert_eq!(value["Nodes"][0]["Weights"], serde_json::json!([2.5, 4.0]));
        assert_eq!(value["Edges"], serde_json::json!([[0, 1], [2, 0]]));
        assert_eq!(value["WeightedEdges"][1]["From"], 2);
        assert_eq!(value["WeightedEdges"][1]["Weight"], 4.0);
    }

    #[test]
    fn test_reads_integer_coordinates_and_nulls() {
        let json = r#"{
            "Nodes": [
                {"X": 60, "Y": 60, "Neighbors": [1], "Weights": null},
                {"X": 140, "Y": 60, "Neighbors": null, "Weights": null}
            ],
            "Edges": [[0, 1]],
            "WeightedEdges": null
        }"#;
        let graph = GraphDocument::from_json_str(json)
            .unwrap()
            .into_graph::<Directed>()
            .unwrap();
        assert_eq!(graph.position(1), Position::new(140.0, 60.0));
        assert_eq!(graph.weighted_neighbors(0), &[(1, DEFAULT_WEIGHT)]);
        assert!(graph.weighted_neighbors(1).is_empty());
        assert_eq!(graph.edges(), &[Edge::new(0, 1, DEFAULT_WEIGHT)]);
    }

    #[test]
    fn test_missing_weights_default_to_one() {
        let document = GraphDocument {
            nodes: vec![
                NodeDocument {
                    x: 0.0,
                    y: 0.0,
                    neighbors: vec![1, 1],
                    weights: vec![3.0],
                },
                NodeDocument::default(),
            ],
            ..GraphDocument::default()
        };
        let graph = document.into_graph::<Directed>().unwrap();
        assert_eq!(graph.weighted_neighbors(0), &[(1, 3.0), (1, DEFAULT_WEIGHT)]);
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_rejects_dangling_ids() {
        let document = GraphDocument {
            nodes: vec![NodeDocument {
                neighbors: vec![4],
                ..NodeDocument::default()
            }],
            ..GraphDocument::default()
        };
        let err = document.into_graph::<Undirected>().unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));

        let document = GraphDocument {
            nodes: vec![NodeDocument::default()],
            weighted_edges: vec![EdgeDocument {
                from: 0,
                to: 3,
                weight: 1.0,
            }],
            ..GraphDocument::default()
        };
        assert!(document.into_graph::<Undirected>().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = GraphDocument::from_json_str("{\"Nodes\": [").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_reader_and_writer() {
        let document = GraphDocument::from_graph(&sample());
        let mut buffer = Vec::new();
        document.to_writer(&mut buffer).unwrap();
        let restored = GraphDocument::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(restored, document);
    }
}
