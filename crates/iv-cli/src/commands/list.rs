use comfy_table::{ContentArrangement, Table};
use iv_datasworn::DataswornKind;

use super::{LoadConfig, load, plural};

pub fn run(config: &LoadConfig, kind: Option<&str>) -> Result<(), String> {
    let kind = kind
        .map(|k| k.parse::<DataswornKind>())
        .transpose()
        .map_err(|e| e.to_string())?;
    let loaded = load(config)?;
    let index = loaded.store.index();

    let records: Vec<_> = match kind {
        Some(kind) => index.by_kind(kind).collect(),
        None => index.iter().collect(),
    };

    if records.is_empty() {
        println!("  No records found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Kind", "Name", "Source"]);
    for record in &records {
        table.add_row(vec![
            record.id.clone(),
            record.kind().to_string(),
            record.value.name().to_string(),
            record.source.path.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {}", plural(records.len(), "record"));

    Ok(())
}
