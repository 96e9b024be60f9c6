pub use crate::adjacency::{Adjacency, WeightedAdjacency};
pub use crate::avl_tree::{AvlHandle, AvlNodeRef, AvlTree};
pub use crate::directedness::{Directed, Directedness, Undirected};
pub use crate::mst::{kruskal, prim};
pub use crate::scc::{kosaraju, tarjan};
pub use crate::search::{StepOutcome, StepwiseTraversal, TraversalKind};
pub use crate::session::{BatchKind, Mode, Session};
pub use crate::shortest_path::{AStarPath, ShortestPaths, a_star, dijkstra};
pub use crate::topological::topological_sort;
pub use crate::weighted_graph::{Edge, NodeId, Position, WeightedGraph};
