//! Generates a random graph and runs every algorithm on it through a
//! [`Session`], printing the results.
//!
//! Set `GRAPHSIM_LOG=debug` to see the algorithm log as well.

use std::fs::File;

use clap::{Parser, ValueEnum};
use graphsim::{
    Directed, Directedness, RandomGraphConfig, Session, StepOutcome, Undirected, WeightedGraph,
    document::GraphDocument, mst::total_weight, tracing_support::init_tracing,
};
use rand::{SeedableRng, rngs::StdRng};

/// Graph kind selector for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
enum GraphKind {
    Directed,
    Undirected,
}

/// Run the graph algorithms on a random graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of nodes to generate
    #[arg(short, long, default_value_t = 10)]
    nodes: usize,

    /// Seed for the random number generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Whether edges are directed
    #[arg(short, long, value_enum, default_value_t = GraphKind::Undirected)]
    kind: GraphKind,

    /// Source node for traversals and shortest paths
    #[arg(long, default_value_t = 0)]
    source: usize,

    /// Goal node for A* (defaults to the last node)
    #[arg(long)]
    goal: Option<usize>,

    /// Values to insert into the AVL tree
    #[arg(long, value_delimiter = ',', default_values_t = [50, 30, 70, 20, 40, 60, 80])]
    avl: Vec<i64>,

    /// Save the generated graph as JSON to this path
    #[arg(short, long)]
    output: Option<String>,
}

fn run<D: Directedness>(args: &Args) -> graphsim::Result<()> {
    let config = RandomGraphConfig::default().with_num_nodes(args.nodes);
    let mut rng = StdRng::seed_from_u64(args.seed);
    let graph = WeightedGraph::<D>::random(&config, &mut rng);
    println!(
        "{} graph: {} nodes, {} edges",
        if graph.is_directed() { "Directed" } else { "Undirected" },
        graph.num_nodes(),
        graph.num_edges()
    );
    for edge in graph.edges() {
        println!("  {} - {} ({:.2})", edge.from, edge.to, edge.weight);
    }

    if let Some(path) = &args.output {
        save(&graph, path)?;
    }

    let mut session = Session::new(graph);
    let source = args.source;
    let goal = args.goal.unwrap_or(args.nodes.saturating_sub(1));

    type StartTraversal<D> = fn(&mut Session<D>, usize) -> graphsim::Result<bool>;
    for (name, start) in [
        ("BFS", Session::start_bfs as StartTraversal<D>),
        ("DFS", Session::start_dfs),
    ] {
        start(&mut session, source)?;
        println!("\n{name} from {source}:");
        loop {
            match session.step() {
                Some(StepOutcome::Visited(node)) => {
                    println!("  visit {node}, frontier {:?}", session.frontier());
                }
                Some(StepOutcome::Skipped) => println!("  skip"),
                Some(StepOutcome::Done) | None => break,
            }
        }
        println!("  order {:?}", session.visit_order());
        session.reset();
    }

    session.start_dijkstra(source)?;
    if let Some(paths) = session.shortest_paths() {
        println!("\nDijkstra from {source}:");
        for node in session.graph().node_ids() {
            match paths.path_to(node) {
                Some(path) => println!("  {node}: {:.2} via {path:?}", paths.distance(node)),
                None => println!("  {node}: unreachable"),
            }
        }
    }
    session.reset();

    session.start_a_star(source, goal)?;
    if let Some(found) = session.path() {
        if found.is_found() {
            println!("\nA* {source} -> {goal}: {:?} cost {:.2}", found.path, found.cost);
        } else {
            println!("\nA* {source} -> {goal}: no path");
        }
    }
    session.reset();

    session.start_topological();
    println!("\nTopological order: {:?}", session.topological_order().unwrap_or(&[]));
    session.reset();

    for (name, start) in [
        ("Kruskal", Session::start_kruskal as fn(&mut Session<D>) -> bool),
        ("Prim", Session::start_prim),
    ] {
        start(&mut session);
        let edges = session.mst_edges().unwrap_or(&[]);
        println!("\n{name}: {} edges, total weight {:.2}", edges.len(), total_weight(edges));
        for edge in edges {
            println!("  {} - {} ({:.2})", edge.from, edge.to, edge.weight);
        }
        session.reset();
    }

    for (name, start) in [
        ("Tarjan", Session::start_tarjan as fn(&mut Session<D>) -> bool),
        ("Kosaraju", Session::start_kosaraju),
    ] {
        start(&mut session);
        println!("\n{name} components: {:?}", session.components().unwrap_or(&[]));
        session.reset();
    }

    session.start_avl();
    for &value in &args.avl {
        session.insert_avl(value);
    }
    if let Some(tree) = session.tree() {
        println!(
            "\nAVL tree: height {}, in order {:?}",
            tree.height(),
            tree.in_order().collect::<Vec<_>>()
        );
    }
    session.reset();

    Ok(())
}

fn save<D: Directedness>(graph: &WeightedGraph<D>, path: &str) -> graphsim::Result<()> {
    let file = File::create(path)?;
    GraphDocument::from_graph(graph).to_writer(file)?;
    println!("Saved to {path}");
    Ok(())
}

fn main() -> graphsim::Result<()> {
    init_tracing();
    let args = Args::parse();
    match args.kind {
        GraphKind::Directed => run::<Directed>(&args),
        GraphKind::Undirected => run::<Undirected>(&args),
    }
}
