use thiserror::Error;

use crate::NodeId;

/// Errors surfaced at the boundary of the crate.  The algorithms themselves
/// are total over valid inputs; only externally supplied ids and documents
/// are checked.
#[derive(Debug, Error)]
pub enum Error {
    /// A source or goal id does not name a node of the session's graph.
    #[error("invalid node id {node}: graph has {num_nodes} nodes")]
    InvalidNode { node: NodeId, num_nodes: usize },

    /// A persisted graph refers to nodes that do not exist.
    #[error("invalid graph document: {0}")]
    InvalidDocument(String),

    #[cfg(feature = "serde")]
    #[error("graph document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "serde")]
    #[error("failed to read or write graph document: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
