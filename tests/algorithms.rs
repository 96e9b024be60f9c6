use graphsim::{
    Adjacency, NodeId, WeightedGraph,
    adjacency::transpose,
    mst::{kruskal, prim, total_weight},
    prelude::*,
    priority_queue::PriorityQueue,
    scc::partition,
    union_find::UnionFind,
};
use quickcheck::{Arbitrary, Gen, quickcheck};

/// A random directed adjacency list over at most 12 nodes.
#[derive(Clone, Debug)]
struct Digraph(Vec<Vec<NodeId>>);

impl Arbitrary for Digraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = usize::arbitrary(g) % 12;
        let mut adjacency = vec![Vec::new(); n];
        if n > 0 {
            for _ in 0..usize::arbitrary(g) % 30 {
                let from = usize::arbitrary(g) % n;
                let to = usize::arbitrary(g) % n;
                adjacency[from].push(to);
            }
        }
        Digraph(adjacency)
    }
}

#[test]
fn test_bfs_and_dfs_letter_graph() {
    let adjacency: Vec<Vec<NodeId>> =
        vec![vec![1, 2], vec![0, 3], vec![0, 3], vec![1, 2, 4], vec![3]];
    let names = ['A', 'B', 'C', 'D', 'E'];

    for (kind, expected) in [
        (TraversalKind::Breadth, "ABCDE"),
        (TraversalKind::Depth, "ACDEB"),
    ] {
        let mut traversal = StepwiseTraversal::start(kind, 0, adjacency.len());
        while traversal.step(&adjacency) != StepOutcome::Done {}
        let order: String = traversal.order().iter().map(|&node| names[node]).collect();
        assert_eq!(order, expected);
        assert!(traversal.frontier().is_empty());
    }
}

#[test]
fn test_kruskal_rejects_cycle_edge() {
    let edges = [Edge::new(0, 1, 1.0), Edge::new(1, 2, 2.0), Edge::new(0, 2, 3.0)];
    let tree = kruskal(&edges, 3);
    assert_eq!(tree, vec![Edge::new(0, 1, 1.0), Edge::new(1, 2, 2.0)]);
    assert_eq!(total_weight(&tree), 3.0);
}

#[test]
fn test_prim_on_weighted_view() {
    let adjacency: Vec<Vec<(NodeId, f64)>> = vec![
        vec![(1, 4.0), (2, 1.0)],
        vec![(0, 4.0), (2, 2.0), (3, 5.0)],
        vec![(0, 1.0), (1, 2.0), (3, 8.0)],
        vec![(1, 5.0), (2, 8.0)],
    ];
    let tree = prim(&adjacency);
    assert_eq!(
        tree,
        vec![Edge::new(0, 2, 1.0), Edge::new(2, 1, 2.0), Edge::new(1, 3, 5.0)]
    );
}

#[test]
fn test_same_view_directed_and_undirected() {
    // The undirected graph materializes both directions, so its adjacency
    // view is strongly connected wherever it is connected.
    let undirected: WeightedGraph = WeightedGraph::from_edges(3, [(0, 1, 1.0), (1, 2, 1.0)]);
    assert_eq!(tarjan(&undirected).len(), 1);
    let directed = WeightedGraph::<Directed>::from_edges(3, [(0, 1, 1.0), (1, 2, 1.0)]);
    assert_eq!(tarjan(&directed).len(), 3);
    assert_eq!(topological_sort(&directed), vec![0, 1, 2]);
}

#[test]
fn test_dijkstra_and_a_star_agree_on_grid() {
    let mut graph: WeightedGraph = WeightedGraph::new();
    for row in 0..3 {
        for col in 0..3 {
            graph.add_node(Position::new(col as f64, row as f64));
        }
    }
    for row in 0..3 {
        for col in 0..3 {
            let node = row * 3 + col;
            if col < 2 {
                graph.add_edge(node, node + 1, 1.0);
            }
            if row < 2 {
                graph.add_edge(node, node + 3, 1.0);
            }
        }
    }
    let paths = dijkstra(&graph, 0);
    let result = a_star(&graph, graph.positions(), 0, 8);
    assert_eq!(result.cost, paths.distance(8));
    assert_eq!(result.cost, 4.0);
    assert_eq!(result.path.len(), 5);
}

#[test]
fn test_transpose_of_transpose() {
    let adjacency: Vec<Vec<NodeId>> = vec![vec![1, 2], vec![2], vec![0]];
    let twice = transpose(&transpose(&adjacency));
    for node in 0..adjacency.len() {
        let mut expected = adjacency[node].clone();
        let mut actual = twice[node].clone();
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }
    assert_eq!(twice.num_nodes(), 3);
}

#[test]
fn test_priority_queue_lazy_deletion() {
    let mut queue = PriorityQueue::new();
    let mut finalized = [false; 3];
    queue.push(2, 5.0);
    queue.push(1, 3.0);
    queue.push(2, 1.0);
    let first = queue.pop_fresh(|item| finalized[item.node]).unwrap();
    assert_eq!((first.node, first.priority), (2, 1.0));
    finalized[2] = true;
    let second = queue.pop_fresh(|item| finalized[item.node]).unwrap();
    assert_eq!(second.node, 1);
    finalized[1] = true;
    assert!(queue.pop_fresh(|item| finalized[item.node]).is_none());
}

#[test]
fn test_union_find_components() {
    let mut sets = UnionFind::new(6);
    sets.union(0, 1);
    sets.union(2, 3);
    sets.union(1, 3);
    assert!(sets.connected(0, 2));
    assert!(!sets.connected(0, 4));
    assert!(!sets.connected(4, 5));
}

#[test]
fn test_scc_partitions_agree() {
    fn prop(graph: Digraph) -> bool {
        partition(&tarjan(&graph.0)) == partition(&kosaraju(&graph.0))
    }
    quickcheck(prop as fn(Digraph) -> bool);
}

#[test]
fn test_scc_members_are_mutually_reachable() {
    fn reachable(adjacency: &[Vec<NodeId>], from: NodeId) -> Vec<bool> {
        let mut traversal = StepwiseTraversal::start(TraversalKind::Depth, from, adjacency.len());
        while traversal.step(adjacency) != StepOutcome::Done {}
        (0..adjacency.len())
            .map(|node| traversal.is_visited(node))
            .collect()
    }

    fn prop(graph: Digraph) -> bool {
        let reach: Vec<Vec<bool>> = (0..graph.0.len())
            .map(|node| reachable(&graph.0, node))
            .collect();
        tarjan(&graph.0).iter().all(|component| {
            component
                .iter()
                .all(|&a| component.iter().all(|&b| reach[a][b] && reach[b][a]))
        })
    }
    quickcheck(prop as fn(Digraph) -> bool);
}
