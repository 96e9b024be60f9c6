//! Strongly connected components (Tarjan and Kosaraju).
//!
//! Both read the adjacency view as directed.  They agree on the partition
//! but not on the order of components or of nodes within a component; use
//! [`partition`] to compare results.

use std::collections::BTreeSet;

use bitvec::vec::BitVec;

use crate::{
    NodeId,
    adjacency::{Adjacency, transpose},
    topological::postorder_from,
    tracing_support::{debug, info_span},
};

/// Normalizes a list of components into a set of node sets.
pub fn partition(components: &[Vec<NodeId>]) -> BTreeSet<BTreeSet<NodeId>> {
    components
        .iter()
        .map(|component| component.iter().copied().collect())
        .collect()
}

#[derive(Clone, Copy)]
struct TarjanMark {
    index: usize,
    lowlink: usize,
    on_stack: bool,
}

/// Finds the strongly connected components in one depth-first pass.
///
/// Components are emitted as they complete, so every component comes before
/// the components that can reach it.  Nodes within a component are listed
/// in the order they were popped off the search stack.
pub fn tarjan<A: Adjacency + ?Sized>(adjacency: &A) -> Vec<Vec<NodeId>> {
    let n = adjacency.num_nodes();
    let _span = info_span!("tarjan", num_nodes = n).entered();
    let mut marks: Vec<Option<TarjanMark>> = vec![None; n];
    let mut next_index = 0;
    let mut stack = Vec::new();
    let mut components = Vec::new();

    for root in 0..n {
        if marks[root].is_some() {
            continue;
        }
        let mut enter = |node: NodeId, marks: &mut [Option<TarjanMark>], stack: &mut Vec<NodeId>| {
            marks[node] = Some(TarjanMark {
                index: next_index,
                lowlink: next_index,
                on_stack: true,
            });
            next_index += 1;
            stack.push(node);
        };
        enter(root, &mut marks, &mut stack);
        let mut calls = vec![(root, adjacency.neighbors(root))];

        while let Some((node, neighbors)) = calls.last_mut() {
            let node = *node;
            if let Some(next) = neighbors.next() {
                let next_mark = marks[next];
                match next_mark {
                    None => {
                        enter(next, &mut marks, &mut stack);
                        calls.push((next, adjacency.neighbors(next)));
                    }
                    Some(mark) if mark.on_stack => {
                        let current = marks[node].as_mut().expect("node was entered");
                        current.lowlink = current.lowlink.min(mark.index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            let mark = marks[node].expect("node was entered");
            if mark.lowlink == mark.index {
                let mut component = Vec::new();
                loop {
                    let member = stack.pop().expect("component root is on the stack");
                    if let Some(member_mark) = marks[member].as_mut() {
                        member_mark.on_stack = false;
                    }
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                components.push(component);
            }
            if let Some(&(parent, _)) = calls.last() {
                let parent_mark = marks[parent].as_mut().expect("parent was entered");
                parent_mark.lowlink = parent_mark.lowlink.min(mark.lowlink);
            }
        }
    }

    debug!(components = components.len(), "tarjan finished");
    components
}

/// Finds the strongly connected components with two depth-first passes: one
/// over the graph to record finishing order, one over the transposed graph
/// in reverse finishing order.
///
/// Nodes within a component are listed in discovery order of the second
/// pass.
pub fn kosaraju<A: Adjacency + ?Sized>(adjacency: &A) -> Vec<Vec<NodeId>> {
    let n = adjacency.num_nodes();
    let _span = info_span!("kosaraju", num_nodes = n).entered();

    let mut visited: BitVec = BitVec::repeat(false, n);
    let mut finished = Vec::with_capacity(n);
    for root in 0..n {
        if !visited[root] {
            postorder_from(adjacency, root, &mut visited, &mut finished);
        }
    }

    let transposed = transpose(adjacency);
    let mut assigned: BitVec = BitVec::repeat(false, n);
    let mut components = Vec::new();
    while let Some(root) = finished.pop() {
        if !assigned[root] {
            components.push(preorder_from(&transposed, root, &mut assigned));
        }
    }

    debug!(components = components.len(), "kosaraju finished");
    components
}

/// Collects the nodes reachable from `root` and not yet visited, in the order
/// a recursive depth-first search would first reach them.
fn preorder_from<A: Adjacency + ?Sized>(
    adjacency: &A,
    root: NodeId,
    visited: &mut BitVec,
) -> Vec<NodeId> {
    visited.set(root, true);
    let mut reached = vec![root];
    let mut stack = vec![adjacency.neighbors(root)];
    while let Some(neighbors) = stack.last_mut() {
        match neighbors.find(|&next| !visited[next]) {
            Some(next) => {
                visited.set(next, true);
                reached.push(next);
                stack.push(adjacency.neighbors(next));
            }
            None => {
                stack.pop();
            }
        }
    }
    reached
}
