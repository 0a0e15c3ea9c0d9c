use comfy_table::{ContentArrangement, Table};

use super::{LoadConfig, load, plural};

pub fn run(config: &LoadConfig) -> Result<(), String> {
    let loaded = load(config)?;

    if !loaded.sources.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Source", "Package", "Origin", "Priority", "Records"]);
        for source in &loaded.sources {
            table.add_row(vec![
                source.path.clone(),
                source.package.clone(),
                source.origin.to_string(),
                source.priority.to_string(),
                source.records.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    let index = loaded.store.index();
    println!(
        "  {} indexed from {}",
        plural(index.len(), "record"),
        plural(loaded.sources.len(), "source")
    );

    if loaded.skipped > 0 {
        return Err(format!("{} failed to load", plural(loaded.skipped, "package")));
    }
    println!("  All checks passed.");
    Ok(())
}
