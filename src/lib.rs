//! Classic graph and tree algorithms behind a small session state machine.
//!
//! Breadth- and depth-first traversal run one [`Session::step`] at a time so a
//! caller can watch them unfold; Dijkstra, A*, topological sort, Kruskal,
//! Prim, Tarjan and Kosaraju run to completion as soon as they are started.
//! The algorithms are also available as free functions over any
//! [`Adjacency`] view.

pub mod adjacency;
pub mod avl_tree;
pub mod config;
pub mod directedness;
#[cfg(feature = "serde")]
pub mod document;
pub mod error;
pub mod mst;
pub mod prelude;
pub mod priority_queue;
pub mod scc;
pub mod search;
pub mod session;
pub mod shortest_path;
pub mod topological;
pub mod tracing_support;
pub mod union_find;
pub mod weighted_graph;

#[cfg(test)]
mod test_support;
mod util;

pub use crate::adjacency::{Adjacency, WeightedAdjacency};
pub use crate::avl_tree::AvlTree;
pub use crate::config::RandomGraphConfig;
pub use crate::directedness::{Directed, Directedness, Undirected};
pub use crate::error::{Error, Result};
pub use crate::search::StepOutcome;
pub use crate::session::{BatchKind, BatchResult, Mode, Session};
pub use crate::weighted_graph::{Edge, NodeId, Position, WeightedGraph};
