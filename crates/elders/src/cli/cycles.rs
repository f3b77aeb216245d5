//! `elders cycles` command implementation.

use std::path::Path;

use colored::Colorize;
use elders::{FamilyGraph, GenealogyStore, RootsMagicStore, find_cycles};

/// Run the cycles command.
pub fn run(database: &Path) -> Result<(), elders::Error> {
    let store = RootsMagicStore::open(database)?;
    let graph = FamilyGraph::from_rows(&store.read_all()?);

    let cycles = find_cycles(&graph);

    if cycles.is_empty() {
        println!("{}", "No cyclic lineages detected.".green());
        return Ok(());
    }

    println!(
        "Found {} cyclic lineages:",
        cycles.len().to_string().red().bold()
    );
    println!();

    for (i, cycle) in cycles.iter().enumerate() {
        println!("  {} {}:", "Cycle".yellow().bold(), i + 1);
        for id in &cycle.persons {
            println!(
                "    {} id {} {}",
                "•".dimmed(),
                id,
                graph.display_name(*id)
            );
        }
    }

    Ok(())
}
