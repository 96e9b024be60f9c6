//! Breadth- and depth-first traversal driven one step at a time.
//!
//! The traversal never runs on its own: each call to
//! [`StepwiseTraversal::step`] does exactly one unit of work, so a caller can
//! animate or inspect the frontier between steps.  Neighbors are filtered
//! only against the visited set when pushed, so a node may sit in the
//! frontier several times; removing an already visited node is reported as
//! [`StepOutcome::Skipped`].

use std::collections::VecDeque;

use bitvec::vec::BitVec;

use crate::{NodeId, adjacency::Adjacency, tracing_support::trace};

/// Frontier discipline of a [`StepwiseTraversal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalKind {
    /// FIFO frontier.
    Breadth,
    /// LIFO frontier; the last pushed neighbor is explored first.
    Depth,
}

/// What a single step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The node was removed from the frontier and visited for the first time.
    Visited(NodeId),
    /// The removed node had already been visited.
    Skipped,
    /// The frontier is empty; the traversal is complete.
    Done,
}

#[derive(Clone, Debug)]
pub struct StepwiseTraversal {
    kind: TraversalKind,
    frontier: VecDeque<NodeId>,
    visited: BitVec,
    order: Vec<NodeId>,
    done: bool,
}

impl StepwiseTraversal {
    /// Starts a traversal from `source` over a graph with `num_nodes` nodes.
    pub fn start(kind: TraversalKind, source: NodeId, num_nodes: usize) -> Self {
        let mut frontier = VecDeque::with_capacity(num_nodes.max(1));
        frontier.push_back(source);
        Self {
            kind,
            frontier,
            visited: BitVec::repeat(false, num_nodes),
            order: Vec::with_capacity(num_nodes),
            done: false,
        }
    }

    pub fn kind(&self) -> TraversalKind {
        self.kind
    }

    /// Advances the traversal by one unit of work.  Once the frontier has
    /// drained every further call returns [`StepOutcome::Done`] without
    /// changing any state.
    pub fn step<A: Adjacency + ?Sized>(&mut self, adjacency: &A) -> StepOutcome {
        let next = match self.kind {
            TraversalKind::Breadth => self.frontier.pop_front(),
            TraversalKind::Depth => self.frontier.pop_back(),
        };
        let Some(node) = next else {
            self.done = true;
            return StepOutcome::Done;
        };
        if self.visited[node] {
            trace!(node, "skipping visited node");
            return StepOutcome::Skipped;
        }
        self.visited.set(node, true);
        self.order.push(node);
        for neighbor in adjacency.neighbors(node) {
            if !self.visited[neighbor] {
                self.frontier.push_back(neighbor);
            }
        }
        trace!(node, frontier = self.frontier.len(), "visited node");
        StepOutcome::Visited(node)
    }

    /// Gets the pending ids, next to be removed first.
    pub fn frontier(&self) -> Vec<NodeId> {
        match self.kind {
            TraversalKind::Breadth => self.frontier.iter().copied().collect(),
            TraversalKind::Depth => self.frontier.iter().rev().copied().collect(),
        }
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.get(node).is_some_and(|bit| *bit)
    }

    /// Gets the visited ids in ascending order.
    pub fn visited(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.visited.iter_ones()
    }

    /// Gets the ids in the order they were visited.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
