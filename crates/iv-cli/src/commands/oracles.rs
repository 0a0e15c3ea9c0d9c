use colored::Colorize;

use super::{LoadConfig, load, plural};

pub fn run(config: &LoadConfig) -> Result<(), String> {
    let loaded = load(config)?;
    let tree = loaded.store.oracle_tree();

    if tree.total == 0 {
        println!("  No oracles found.");
        return Ok(());
    }

    for ruleset in &tree.rulesets {
        println!("  {} ({})", ruleset.name.bold(), ruleset.id.dimmed());
        for group in &ruleset.groups {
            println!("    {}", group.name);
            for oracle in &group.oracles {
                println!("      {}  {}", oracle.name, oracle.id.dimmed());
            }
        }
        println!();
    }
    println!("  {}", plural(tree.total, "oracle"));

    Ok(())
}
