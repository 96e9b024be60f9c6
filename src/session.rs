//! The session: one graph, one optional AVL tree, and the mode state machine
//! that decides whether an algorithm is stepped or run to completion.
//!
//! ```text
//! Idle --start_bfs/start_dfs--> Bfs/Dfs  (advanced by step())
//! Idle --start_avl-----------> Avl       (mutated by insert_avl/delete_avl)
//! Idle --start_<batch>-------> Batch(kind), done immediately
//! any  --reset---------------> Idle
//! ```
//!
//! Starting anything while not idle is ignored.  Node ids supplied by the
//! caller are validated here, so the algorithms only ever see valid ids.

use derivative::Derivative;

use crate::{
    NodeId, Result,
    avl_tree::{AvlNodeRef, AvlTree},
    directedness::{Directedness, Undirected},
    error::Error,
    mst,
    scc,
    search::{StepOutcome, StepwiseTraversal, TraversalKind},
    shortest_path::{self, AStarPath, ShortestPaths},
    topological,
    tracing_support::debug,
    weighted_graph::{Edge, WeightedGraph},
};

/// The batch algorithms.  Each runs to completion inside its `start_*` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatchKind {
    Dijkstra,
    AStar,
    Topological,
    Kruskal,
    Prim,
    Tarjan,
    Kosaraju,
}

/// The externally visible state of a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Idle,
    Bfs,
    Dfs,
    Avl,
    Batch(BatchKind),
}

/// The payload produced by a batch algorithm.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchResult {
    Dijkstra {
        source: NodeId,
        paths: ShortestPaths,
    },
    AStar {
        start: NodeId,
        goal: NodeId,
        path: AStarPath,
    },
    Topological(Vec<NodeId>),
    Kruskal(Vec<Edge>),
    Prim(Vec<Edge>),
    Tarjan(Vec<Vec<NodeId>>),
    Kosaraju(Vec<Vec<NodeId>>),
}

impl BatchResult {
    pub fn kind(&self) -> BatchKind {
        match self {
            BatchResult::Dijkstra { .. } => BatchKind::Dijkstra,
            BatchResult::AStar { .. } => BatchKind::AStar,
            BatchResult::Topological(_) => BatchKind::Topological,
            BatchResult::Kruskal(_) => BatchKind::Kruskal,
            BatchResult::Prim(_) => BatchKind::Prim,
            BatchResult::Tarjan(_) => BatchKind::Tarjan,
            BatchResult::Kosaraju(_) => BatchKind::Kosaraju,
        }
    }
}

#[derive(Clone, Debug)]
struct TraversalState {
    traversal: StepwiseTraversal,
    current: Option<NodeId>,
    last_active: Option<NodeId>,
    steps: usize,
}

#[derive(Clone, Debug, Default)]
enum State {
    #[default]
    Idle,
    Traversal(TraversalState),
    Avl(AvlTree<i64>),
    Batch(BatchResult),
}

/// Owns a graph and runs at most one algorithm on it at a time.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), Default(bound = ""))]
pub struct Session<D: Directedness = Undirected> {
    graph: WeightedGraph<D>,
    state: State,
}

impl<D: Directedness> Session<D> {
    /// Creates an idle session over `graph`.
    pub fn new(graph: WeightedGraph<D>) -> Self {
        Self {
            graph,
            state: State::Idle,
        }
    }

    pub fn mode(&self) -> Mode {
        match &self.state {
            State::Idle => Mode::Idle,
            State::Traversal(state) => match state.traversal.kind() {
                TraversalKind::Breadth => Mode::Bfs,
                TraversalKind::Depth => Mode::Dfs,
            },
            State::Avl(_) => Mode::Avl,
            State::Batch(result) => Mode::Batch(result.kind()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    pub fn graph(&self) -> &WeightedGraph<D> {
        &self.graph
    }

    /// Gets the graph for editing.  Only available while idle, so no
    /// algorithm state ever refers to a graph that has since changed.
    pub fn graph_mut(&mut self) -> Option<&mut WeightedGraph<D>> {
        match self.state {
            State::Idle => Some(&mut self.graph),
            _ => None,
        }
    }

    /// Swaps in a new graph and returns the old one.  The session is reset.
    pub fn replace_graph(&mut self, graph: WeightedGraph<D>) -> WeightedGraph<D> {
        self.reset();
        std::mem::replace(&mut self.graph, graph)
    }

    /// Returns to idle, discarding any traversal, tree or batch result.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            debug!(mode = ?self.mode(), "session reset");
        }
        self.state = State::Idle;
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        self.graph
            .check_valid_node_id(node)
            .map_err(|_| Error::InvalidNode {
                node,
                num_nodes: self.graph.num_nodes(),
            })
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn ignore_start(&self, requested: &'static str) -> bool {
        debug!(requested, mode = ?self.mode(), "start ignored: session is not idle");
        false
    }

    fn enter(&mut self, state: State) {
        self.state = state;
        debug!(mode = ?self.mode(), "session started");
    }

    // Stepwise traversal

    /// Starts a breadth-first traversal.  Returns `Ok(false)` if the session
    /// is not idle.
    pub fn start_bfs(&mut self, source: NodeId) -> Result<bool> {
        self.start_traversal(TraversalKind::Breadth, source)
    }

    /// Starts a depth-first traversal.  Returns `Ok(false)` if the session is
    /// not idle.
    pub fn start_dfs(&mut self, source: NodeId) -> Result<bool> {
        self.start_traversal(TraversalKind::Depth, source)
    }

    fn start_traversal(&mut self, kind: TraversalKind, source: NodeId) -> Result<bool> {
        if !self.is_idle() {
            return Ok(self.ignore_start("traversal"));
        }
        self.check_node(source)?;
        let traversal = StepwiseTraversal::start(kind, source, self.graph.num_nodes());
        self.enter(State::Traversal(TraversalState {
            traversal,
            current: None,
            last_active: None,
            steps: 0,
        }));
        Ok(true)
    }

    /// Advances a BFS or DFS by one step.  Returns `None` in every other
    /// mode.  Once the traversal is done every call returns
    /// `Some(StepOutcome::Done)` and changes nothing.
    pub fn step(&mut self) -> Option<StepOutcome> {
        let State::Traversal(state) = &mut self.state else {
            return None;
        };
        if state.traversal.is_done() {
            return Some(StepOutcome::Done);
        }
        let outcome = state.traversal.step(&self.graph);
        match outcome {
            StepOutcome::Visited(node) => {
                state.last_active = state.current;
                state.current = Some(node);
                state.steps += 1;
            }
            StepOutcome::Skipped => state.steps += 1,
            StepOutcome::Done => debug!(visited = state.traversal.order().len(), "traversal done"),
        }
        Some(outcome)
    }

    /// Steps a BFS or DFS until it is done and returns the visit order.
    pub fn run_to_completion(&mut self) -> &[NodeId] {
        while let Some(StepOutcome::Visited(_) | StepOutcome::Skipped) = self.step() {}
        self.visit_order()
    }

    fn traversal(&self) -> Option<&TraversalState> {
        match &self.state {
            State::Traversal(state) => Some(state),
            _ => None,
        }
    }

    /// Gets the node visited by the most recent step.
    pub fn current(&self) -> Option<NodeId> {
        self.traversal().and_then(|state| state.current)
    }

    /// Gets the node visited by the step before the most recent one.
    pub fn last_active(&self) -> Option<NodeId> {
        self.traversal().and_then(|state| state.last_active)
    }

    /// Gets the number of steps that removed a node from the frontier.
    pub fn steps_taken(&self) -> usize {
        self.traversal().map_or(0, |state| state.steps)
    }

    pub fn visit_order(&self) -> &[NodeId] {
        self.traversal()
            .map(|state| state.traversal.order())
            .unwrap_or(&[])
    }

    /// Gets the pending frontier, next to be removed first.
    pub fn frontier(&self) -> Vec<NodeId> {
        self.traversal()
            .map(|state| state.traversal.frontier())
            .unwrap_or_default()
    }

    /// Gets the visited nodes in ascending order.
    pub fn visited(&self) -> Vec<NodeId> {
        self.traversal()
            .map(|state| state.traversal.visited().collect())
            .unwrap_or_default()
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.traversal()
            .is_some_and(|state| state.traversal.is_visited(node))
    }

    /// True once a traversal has drained its frontier, and immediately after
    /// any batch algorithm.
    pub fn is_done(&self) -> bool {
        match &self.state {
            State::Traversal(state) => state.traversal.is_done(),
            State::Batch(_) => true,
            State::Idle | State::Avl(_) => false,
        }
    }

    // AVL tree

    /// Enters AVL mode with a fresh, empty tree.
    pub fn start_avl(&mut self) -> bool {
        if !self.is_idle() {
            return self.ignore_start("avl");
        }
        self.enter(State::Avl(AvlTree::new()));
        true
    }

    pub fn tree(&self) -> Option<&AvlTree<i64>> {
        match &self.state {
            State::Avl(tree) => Some(tree),
            _ => None,
        }
    }

    /// Inserts into the tree.  Returns false outside AVL mode or for a
    /// duplicate value.
    pub fn insert_avl(&mut self, value: i64) -> bool {
        match &mut self.state {
            State::Avl(tree) => tree.insert(value),
            _ => false,
        }
    }

    /// Deletes from the tree.  Returns false outside AVL mode or if the value
    /// is absent.
    pub fn delete_avl(&mut self, value: i64) -> bool {
        match &mut self.state {
            State::Avl(tree) => tree.delete(&value),
            _ => false,
        }
    }

    pub fn search_avl(&self, value: i64) -> Option<AvlNodeRef<'_, i64>> {
        self.tree().and_then(|tree| tree.search(&value))
    }

    // Batch algorithms

    fn run_batch(&mut self, result: BatchResult) {
        self.enter(State::Batch(result));
    }

    /// Runs Dijkstra from `source`.
    pub fn start_dijkstra(&mut self, source: NodeId) -> Result<bool> {
        if !self.is_idle() {
            return Ok(self.ignore_start("dijkstra"));
        }
        self.check_node(source)?;
        let paths = shortest_path::dijkstra(&self.graph, source);
        self.run_batch(BatchResult::Dijkstra { source, paths });
        Ok(true)
    }

    /// Runs A* from `start` to `goal`.
    pub fn start_a_star(&mut self, start: NodeId, goal: NodeId) -> Result<bool> {
        if !self.is_idle() {
            return Ok(self.ignore_start("a_star"));
        }
        self.check_node(start)?;
        self.check_node(goal)?;
        let path = shortest_path::a_star(&self.graph, self.graph.positions(), start, goal);
        self.run_batch(BatchResult::AStar { start, goal, path });
        Ok(true)
    }

    pub fn start_topological(&mut self) -> bool {
        if !self.is_idle() {
            return self.ignore_start("topological");
        }
        let order = topological::topological_sort(&self.graph);
        self.run_batch(BatchResult::Topological(order));
        true
    }

    pub fn start_kruskal(&mut self) -> bool {
        if !self.is_idle() {
            return self.ignore_start("kruskal");
        }
        let edges = mst::kruskal(self.graph.edges(), self.graph.num_nodes());
        self.run_batch(BatchResult::Kruskal(edges));
        true
    }

    pub fn start_prim(&mut self) -> bool {
        if !self.is_idle() {
            return self.ignore_start("prim");
        }
        let edges = mst::prim(&self.graph);
        self.run_batch(BatchResult::Prim(edges));
        true
    }

    pub fn start_tarjan(&mut self) -> bool {
        if !self.is_idle() {
            return self.ignore_start("tarjan");
        }
        let components = scc::tarjan(&self.graph);
        self.run_batch(BatchResult::Tarjan(components));
        true
    }

    pub fn start_kosaraju(&mut self) -> bool {
        if !self.is_idle() {
            return self.ignore_start("kosaraju");
        }
        let components = scc::kosaraju(&self.graph);
        self.run_batch(BatchResult::Kosaraju(components));
        true
    }

    // Batch results

    pub fn batch_result(&self) -> Option<&BatchResult> {
        match &self.state {
            State::Batch(result) => Some(result),
            _ => None,
        }
    }

    /// Gets the Dijkstra distances and predecessors.
    pub fn shortest_paths(&self) -> Option<&ShortestPaths> {
        match self.batch_result()? {
            BatchResult::Dijkstra { paths, .. } => Some(paths),
            _ => None,
        }
    }

    pub fn distances(&self) -> Option<&[f64]> {
        self.shortest_paths().map(|paths| paths.distances.as_slice())
    }

    pub fn predecessors(&self) -> Option<&[Option<NodeId>]> {
        self.shortest_paths()
            .map(|paths| paths.predecessors.as_slice())
    }

    /// Gets the A* result.
    pub fn path(&self) -> Option<&AStarPath> {
        match self.batch_result()? {
            BatchResult::AStar { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn topological_order(&self) -> Option<&[NodeId]> {
        match self.batch_result()? {
            BatchResult::Topological(order) => Some(order),
            _ => None,
        }
    }

    /// Gets the edges accepted by Kruskal or Prim.
    pub fn mst_edges(&self) -> Option<&[Edge]> {
        match self.batch_result()? {
            BatchResult::Kruskal(edges) | BatchResult::Prim(edges) => Some(edges),
            _ => None,
        }
    }

    /// Gets the components found by Tarjan or Kosaraju.
    pub fn components(&self) -> Option<&[Vec<NodeId>]> {
        match self.batch_result()? {
            BatchResult::Tarjan(components) | BatchResult::Kosaraju(components) => {
                Some(components)
            }
            _ => None,
        }
    }
}
