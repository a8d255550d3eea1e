//! Example: Compacting a small layout until it is stable
//!
//! This example builds a scattered layout with a rigid group and a pinned
//! node, then runs alternating compaction passes on it. An optional TOML
//! configuration file can be passed as the first argument, for example:
//!
//! ```toml
//! constraints = "quadratic"
//!
//! [spacing]
//! horizontal = 10.0
//! vertical = 5.0
//!
//! [stabilize]
//! max_rounds = 4
//! ```
//!
//! Set `RUST_LOG=debug` to see the individual passes.

use std::{env, fs};

use cinch::{
    Compactor, Graph, Node, Stabilizer, config::CompactionConfig, geometry::Rect,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: CompactionConfig = match env::args().nth(1) {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => CompactionConfig::default(),
    };

    let mut graph = Graph::new();
    let nodes = [
        ("header", Node::new(Rect::new(10.0, 0.0, 120.0, 30.0))),
        ("client", Node::new(Rect::new(0.0, 80.0, 40.0, 40.0))),
        ("server", Node::new(Rect::new(150.0, 70.0, 40.0, 60.0))),
        ("cache", Node::new(Rect::new(150.0, 200.0, 40.0, 20.0))),
        (
            "database",
            Node::new(Rect::new(300.0, 90.0, 50.0, 50.0)).with_reposition(false),
        ),
    ];
    let ids: Vec<_> = nodes
        .into_iter()
        .map(|(name, node)| (name, graph.add_node(node)))
        .collect();

    // server and cache travel together
    graph.add_group(&[ids[2].1, ids[3].1])?;

    println!("Before:");
    for (name, id) in &ids {
        println!("  {name:>8}: {:?}", graph.node(*id).hitbox());
    }

    let mut compactor = Compactor::from_config(&mut graph, &config)?;
    let report = Stabilizer::from_config(&mut compactor, config.stabilize()).run()?;
    drop(compactor);

    println!();
    println!(
        "Stabilized after {} round(s), last movement {:.4}, converged: {}",
        report.rounds, report.movement, report.converged
    );
    println!();
    println!("After:");
    for (name, id) in &ids {
        println!("  {name:>8}: {:?}", graph.node(*id).hitbox());
    }

    Ok(())
}
