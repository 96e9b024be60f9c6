use graphsim::{
    BatchKind, Directed, Error, Mode, Position, RandomGraphConfig, Session, StepOutcome,
    WeightedGraph, tracing_support::init_tracing,
};
use rand::{SeedableRng, rngs::StdRng};

/// A:[B,C], B:[A,D], C:[A,D], D:[B,C,E], E:[D]
fn letters() -> Session {
    Session::new(WeightedGraph::from_edges(
        5,
        [(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0), (3, 4, 1.0)],
    ))
}

fn random_session(seed: u64) -> Session {
    let config = RandomGraphConfig::default().with_num_nodes(15);
    Session::new(WeightedGraph::random(&config, &mut StdRng::seed_from_u64(seed)))
}

#[test]
fn test_stepwise_then_batch() {
    init_tracing();
    let mut session = letters();

    assert!(session.start_bfs(0).unwrap());
    let mut visited = Vec::new();
    loop {
        match session.step() {
            Some(StepOutcome::Visited(node)) => visited.push(node),
            Some(StepOutcome::Skipped) => {}
            Some(StepOutcome::Done) => break,
            None => panic!("step returned None during a traversal"),
        }
    }
    assert_eq!(visited, vec![0, 1, 2, 3, 4]);
    assert_eq!(session.step(), Some(StepOutcome::Done));

    // Batch algorithms cannot start until the traversal is reset.
    assert!(!session.start_dijkstra(0).unwrap());
    session.reset();
    assert!(session.start_dijkstra(4).unwrap());
    assert_eq!(session.mode(), Mode::Batch(BatchKind::Dijkstra));
    assert!(session.is_done());
    assert_eq!(session.distances(), Some(&[3.0, 2.0, 2.0, 1.0, 0.0][..]));
    let paths = session.shortest_paths().unwrap();
    assert_eq!(paths.path_to(0), Some(vec![4, 3, 1, 0]));
}

#[test]
fn test_every_batch_algorithm_on_random_graph() {
    let mut session = random_session(3);
    let num_nodes = session.graph().num_nodes();

    assert!(session.start_kruskal());
    let kruskal_weight = graphsim::mst::total_weight(session.mst_edges().unwrap());
    session.reset();
    assert!(session.start_prim());
    let prim_edges = session.mst_edges().unwrap().to_vec();
    session.reset();

    assert!(session.start_tarjan());
    let tarjan = graphsim::scc::partition(session.components().unwrap());
    session.reset();
    assert!(session.start_kosaraju());
    let kosaraju = graphsim::scc::partition(session.components().unwrap());
    assert_eq!(tarjan, kosaraju);
    session.reset();

    // On an undirected graph the components are the connected components, so
    // Prim spans exactly the component of node 0 and matches Kruskal when
    // that is the whole graph.
    let home = tarjan.iter().find(|component| component.contains(&0)).unwrap();
    assert_eq!(prim_edges.len() + 1, home.len());
    if home.len() == num_nodes {
        let prim_weight = graphsim::mst::total_weight(&prim_edges);
        assert!((prim_weight - kruskal_weight).abs() < 1e-9);
    }

    assert!(session.start_topological());
    let mut order = session.topological_order().unwrap().to_vec();
    order.sort_unstable();
    assert_eq!(order, (0..num_nodes).collect::<Vec<_>>());
    session.reset();

    let goal = num_nodes - 1;
    assert!(session.start_dijkstra(0).unwrap());
    let expected = session.shortest_paths().unwrap().distance(goal);
    session.reset();
    assert!(session.start_a_star(0, goal).unwrap());
    let found = session.path().unwrap();
    assert_eq!(found.is_found(), expected.is_finite());
    if found.is_found() {
        assert!(found.cost >= expected - 1e-9);
        assert_eq!(found.path.first(), Some(&0));
        assert_eq!(found.path.last(), Some(&goal));
    }
}

#[test]
fn test_dfs_and_bfs_reach_the_same_nodes() {
    let mut session = random_session(11);
    session.start_bfs(2).unwrap();
    let mut bfs = session.run_to_completion().to_vec();
    session.reset();
    session.start_dfs(2).unwrap();
    let mut dfs = session.run_to_completion().to_vec();
    bfs.sort_unstable();
    dfs.sort_unstable();
    assert_eq!(bfs, dfs);
    assert_eq!(session.visited(), dfs);
}

#[test]
fn test_invalid_ids_are_reported() {
    let mut session = letters();
    match session.start_dijkstra(9) {
        Err(Error::InvalidNode { node, num_nodes }) => {
            assert_eq!((node, num_nodes), (9, 5));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(session.start_a_star(9, 0).is_err());
    assert!(session.start_dfs(5).is_err());
    assert_eq!(session.mode(), Mode::Idle);
}

#[test]
fn test_avl_mode() {
    let mut session = letters();
    assert!(session.start_avl());
    for value in 1..=7 {
        session.insert_avl(value);
    }
    assert!(!session.start_bfs(0).unwrap());
    let tree = session.tree().unwrap();
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.root().map(|root| *root.value()), Some(4));
    assert!(session.delete_avl(4));
    assert_eq!(session.tree().unwrap().root().map(|root| *root.value()), Some(5));
    assert!(session.search_avl(4).is_none());
    assert_eq!(session.search_avl(6).map(|node| node.height()), Some(2));
}

#[test]
fn test_directed_session() {
    // 0 -> 1 -> 2 -> 0 and 2 -> 3
    let graph = WeightedGraph::<Directed>::from_edges(
        4,
        [(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (2, 3, 1.0)],
    );
    let mut session = Session::new(graph);
    assert!(session.start_bfs(3).unwrap());
    assert_eq!(session.run_to_completion(), &[3]);
    session.reset();
    assert!(session.start_tarjan());
    assert_eq!(session.components().map(<[_]>::len), Some(2));
}

#[test]
fn test_editing_between_runs() {
    let mut session: Session = Session::default();
    {
        let graph = session.graph_mut().unwrap();
        let a = graph.add_node(Position::new(0.0, 0.0));
        let b = graph.add_node(Position::new(3.0, 4.0));
        let c = graph.add_node(Position::new(6.0, 8.0));
        graph.add_edge(a, b, 5.0);
        graph.add_edge(b, c, 5.0);
    }
    assert!(session.start_a_star(0, 2).unwrap());
    assert_eq!(session.path().unwrap().path, vec![0, 1, 2]);
    assert!(session.graph_mut().is_none());
    session.reset();

    session.graph_mut().unwrap().remove_node(1);
    assert!(session.start_a_star(0, 1).unwrap());
    assert!(!session.path().unwrap().is_found());
}

#[cfg(feature = "serde")]
#[test]
fn test_saved_graph_reloads_into_session() {
    use graphsim::document::GraphDocument;

    let session = random_session(5);
    let json = GraphDocument::from_graph(session.graph())
        .to_json_string()
        .unwrap();
    let graph = GraphDocument::from_json_str(&json)
        .unwrap()
        .into_graph()
        .unwrap();
    let mut reloaded: Session = Session::new(graph);
    assert_eq!(reloaded.graph().adjacency(), session.graph().adjacency());
    assert_eq!(reloaded.graph().positions(), session.graph().positions());
    assert!(reloaded.start_prim());
}

#[cfg(feature = "tracing")]
#[test]
fn test_algorithm_spans_are_timed() {
    use graphsim::tracing_support::{algorithm_timings, reset_algorithm_timings};

    reset_algorithm_timings();
    let mut session = random_session(8);
    session.start_dijkstra(0).unwrap();
    session.reset();
    session.start_kosaraju();
    let timings = algorithm_timings();
    assert_eq!(timings.get("dijkstra").map(|timing| timing.count), Some(1));
    assert_eq!(timings.get("kosaraju").map(|timing| timing.count), Some(1));
}
