//! Single-source (Dijkstra) and two-point heuristic (A*) shortest paths.
//!
//! Both expect non-negative edge weights.  Negative weights are not detected
//! and give meaningless results.

use crate::{
    NodeId,
    adjacency::WeightedAdjacency,
    priority_queue::PriorityQueue,
    tracing_support::{debug, info_span},
    weighted_graph::Position,
};

/// Distances and shortest-path predecessors from one source to every node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShortestPaths {
    /// `distances[v]` is the length of a shortest path to `v`, or infinity.
    pub distances: Vec<f64>,
    /// `predecessors[v]` is the node before `v` on that path; `None` for the
    /// source and for unreachable nodes.
    pub predecessors: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    pub fn distance(&self, node: NodeId) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors.get(node).copied().flatten()
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_finite()
    }

    /// Reconstructs the path from the source to `dest`, both included, by
    /// following predecessors backwards.  Returns `None` if `dest` is
    /// unreachable.
    pub fn path_to(&self, dest: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(dest) {
            return None;
        }
        let mut path = vec![dest];
        let mut current = dest;
        while let Some(previous) = self.predecessor(current) {
            if path.len() > self.distances.len() {
                break;
            }
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// Computes shortest distances from `source` to every node.
///
/// Returns empty maps for an empty graph.
///
/// # Panics
///
/// Panics if `source` is not a node of a non-empty graph.
pub fn dijkstra<A>(adjacency: &A, source: NodeId) -> ShortestPaths
where
    A: WeightedAdjacency + ?Sized,
{
    let n = adjacency.num_nodes();
    let _span = info_span!("dijkstra", source, num_nodes = n).entered();
    if n == 0 {
        return ShortestPaths::default();
    }

    let mut distances = vec![f64::INFINITY; n];
    let mut predecessors = vec![None; n];
    let mut finalized = vec![false; n];
    distances[source] = 0.0;

    let mut queue = PriorityQueue::with_capacity(n);
    queue.push(source, 0.0);
    while let Some(item) = queue.pop_fresh(|item| finalized[item.node]) {
        let current = item.node;
        finalized[current] = true;
        for (to, weight) in adjacency.weighted_neighbors(current) {
            if finalized[to] {
                continue;
            }
            let candidate = distances[current] + weight;
            if candidate < distances[to] {
                distances[to] = candidate;
                predecessors[to] = Some(current);
                queue.push(to, candidate);
            }
        }
    }

    debug!(
        reachable = distances.iter().filter(|d| d.is_finite()).count(),
        "dijkstra finished"
    );
    ShortestPaths {
        distances,
        predecessors,
    }
}

/// The result of an A* search.
#[derive(Clone, Debug, PartialEq)]
pub struct AStarPath {
    /// Nodes from start to goal inclusive; empty if the goal is unreachable.
    pub path: Vec<NodeId>,
    /// Length of `path`, or infinity if the goal is unreachable.
    pub cost: f64,
}

impl AStarPath {
    fn not_found() -> Self {
        Self {
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Finds a shortest path from `start` to `goal`, guided by the straight-line
/// distance between `positions`.
///
/// # Panics
///
/// Panics if `start` or `goal` is not a node, or `positions` is shorter than
/// the graph.
pub fn a_star<A>(adjacency: &A, positions: &[Position], start: NodeId, goal: NodeId) -> AStarPath
where
    A: WeightedAdjacency + ?Sized,
{
    let n = adjacency.num_nodes();
    let _span = info_span!("a_star", start, goal, num_nodes = n).entered();
    if n == 0 {
        return AStarPath::not_found();
    }
    let heuristic = |node: NodeId| positions[node].distance_to(&positions[goal]);

    let mut g_score = vec![f64::INFINITY; n];
    let mut f_score = vec![f64::INFINITY; n];
    let mut came_from = vec![None; n];
    g_score[start] = 0.0;
    f_score[start] = heuristic(start);

    let mut open = PriorityQueue::with_capacity(n);
    open.push(start, f_score[start]);
    // An entry is stale once a cheaper one for the same node was pushed.
    while let Some(item) = open.pop_fresh(|item| item.priority > f_score[item.node]) {
        let current = item.node;
        if current == goal {
            let path = reconstruct(&came_from, start, goal);
            debug!(len = path.len(), cost = g_score[goal], "a_star reached goal");
            return AStarPath {
                path,
                cost: g_score[goal],
            };
        }
        for (to, weight) in adjacency.weighted_neighbors(current) {
            let tentative = g_score[current] + weight;
            if tentative < g_score[to] {
                came_from[to] = Some(current);
                g_score[to] = tentative;
                f_score[to] = tentative + heuristic(to);
                open.push(to, f_score[to]);
            }
        }
    }

    debug!("a_star exhausted the open set");
    AStarPath::not_found()
}

fn reconstruct(came_from: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(previous) = came_from[current] else {
            break;
        };
        // Cycle guard.
        if path.len() > came_from.len() {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
