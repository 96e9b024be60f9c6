use bitvec::vec::BitVec;

use crate::{
    NodeId,
    adjacency::Adjacency,
    tracing_support::{debug, info_span},
};

/// Orders the nodes so that, for a DAG, every edge points forward.
///
/// Runs a depth-first search from every unvisited node in id order and
/// returns the reverse of the finishing order.  Cycles are not detected: on
/// a cyclic graph the result is still a permutation of the nodes, just not a
/// topological order.
pub fn topological_sort<A: Adjacency + ?Sized>(adjacency: &A) -> Vec<NodeId> {
    let n = adjacency.num_nodes();
    let _span = info_span!("topological_sort", num_nodes = n).entered();
    let mut visited: BitVec = BitVec::repeat(false, n);
    let mut finished = Vec::with_capacity(n);
    for root in 0..n {
        if !visited[root] {
            postorder_from(adjacency, root, &mut visited, &mut finished);
        }
    }
    finished.reverse();
    debug!(len = finished.len(), "topological sort finished");
    finished
}

/// Appends the nodes reachable from `root` and not yet visited to
/// `finished`, each after all of its unvisited descendants.
pub(crate) fn postorder_from<A: Adjacency + ?Sized>(
    adjacency: &A,
    root: NodeId,
    visited: &mut BitVec,
    finished: &mut Vec<NodeId>,
) {
    visited.set(root, true);
    let mut stack = vec![(root, adjacency.neighbors(root))];
    while let Some((node, neighbors)) = stack.last_mut() {
        match neighbors.find(|&next| !visited[next]) {
            Some(next) => {
                visited.set(next, true);
                stack.push((next, adjacency.neighbors(next)));
            }
            None => {
                finished.push(*node);
                stack.pop();
            }
        }
    }
}
