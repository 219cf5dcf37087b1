//! Simple example demonstrating trueno-graphdb usage
//!
//! Run with: cargo run --example simple_graph
//! Set `RUST_LOG=trueno_graphdb=debug` to see store logging.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use trueno_graphdb::{GraphStore, StoreConfig, Verbosity};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("trueno-graphdb example\n");

    // 1. Build a compatibility graph (undirected, weighted)
    let config = StoreConfig::default().with_verbosity(Verbosity::Noisy);
    let mut graph = GraphStore::with_config(false, config);
    graph.insert_edge("alu", "mul", 3)?;
    graph.insert_edge("alu", "shift", 2)?;
    graph.insert_edge("mul", "shift", 1)?;
    graph.insert_edge("shift", "load", 4)?;
    graph.insert_vertex("store")?;

    println!(
        "Graph built: {} vertices, {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );

    // 2. Query neighborhoods
    let common = graph.common_neighbors("alu", "mul");
    println!("alu and mul share: {common:?}");
    for (key, vertex) in graph.vertices() {
        println!("  {key}: degree {}", vertex.degree());
    }

    // 3. Mutate
    graph.delete_vertex("shift")?;
    println!(
        "\nAfter deleting 'shift': {} vertices, {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );

    // 4. Dump and reload
    let path = std::env::temp_dir().join("trueno_graphdb_example.txt");
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    graph.write_graph(std::io::BufWriter::new(file))?;
    println!("\nSaved to {}", path.display());

    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut loaded = GraphStore::default();
    loaded.read_graph(std::io::BufReader::new(file))?;

    // 5. Validate
    let report = loaded.check_graph();
    println!(
        "Reloaded: {} vertices, {} edges, {} violations",
        loaded.num_vertices(),
        loaded.num_edges(),
        report.violations.len()
    );

    Ok(())
}
