use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::{LoadConfig, load, not_found, plural};

pub fn run(config: &LoadConfig, id: &str) -> Result<(), String> {
    let loaded = load(config)?;
    let index = loaded.store.index();

    let candidates = index.conflicts(id);
    let Some(winner) = candidates.first() else {
        return Err(not_found(&loaded.store, id));
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Source", "Priority", "Name"]);
    for (i, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            if i == 0 { "*" } else { "" }.to_string(),
            candidate.source.path.clone(),
            candidate.priority().to_string(),
            candidate.value.name().to_string(),
        ]);
    }

    println!("  {} [{}]", id.bold(), winner.kind().to_string().dimmed());
    println!();
    println!("{table}");
    println!();
    println!(
        "  {} defined by {}; winner: {}",
        id,
        plural(candidates.len(), "source"),
        winner.source.path
    );

    Ok(())
}
