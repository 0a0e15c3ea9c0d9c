use colored::Colorize;
use iv_datasworn::browser::group_label;
use iv_datasworn::model::PackageType;
use iv_datasworn::{Asset, DataswornValue, MoveCategory, MoveRecord, Oracle, RulesPackage};

use super::{LoadConfig, load, not_found, plural};

pub fn run(config: &LoadConfig, id: &str) -> Result<(), String> {
    let loaded = load(config)?;
    let index = loaded.store.index();

    let record = index.get(id).ok_or_else(|| not_found(&loaded.store, id))?;

    // Header
    println!("  {} [{}]", record.value.name().bold(), record.kind().to_string().dimmed());
    println!("  id:         {}", record.id);
    println!("  source:     {}", record.source);
    println!();

    match &record.value {
        DataswornValue::MoveCategory(category) => show_category(category),
        DataswornValue::Move(mv) => show_move(mv),
        DataswornValue::Asset(asset) => show_asset(asset),
        DataswornValue::Oracle(oracle) => show_oracle(oracle),
        DataswornValue::RulesPackage(package) => show_package(package),
    }

    let others = index.conflicts(id).len().saturating_sub(1);
    if others > 0 {
        println!();
        println!(
            "  overrides {} (see `iv conflicts {id}`)",
            plural(others, "other definition")
        );
    }

    Ok(())
}

fn show_category(category: &MoveCategory) {
    println!("  {}:", plural(category.contents.len(), "move"));
    for mv in category.contents.values() {
        println!("    {}  {}", mv.name, mv.id.dimmed());
    }
}

fn show_move(record: &MoveRecord) {
    let mv = &record.definition;
    println!("  kind:       {}", mv.kind());
    if let Some(asset_id) = &record.origin.asset_id {
        println!("  asset:      {asset_id}");
    }
    if !mv.trigger.text.is_empty() {
        println!("  trigger:    {}", mv.trigger.text);
    }
    if !mv.text.is_empty() {
        println!();
        for line in mv.text.lines() {
            println!("  {}", line.trim());
        }
    }
}

fn show_asset(asset: &Asset) {
    if let Some(category) = &asset.category {
        println!("  category:   {category}");
    }
    for ability in &asset.abilities {
        let mark = if ability.enabled { "[x]" } else { "[ ]" };
        println!("  {mark} {}", ability.text);
        for mv in ability.moves.values() {
            println!("      grants {}  {}", mv.name, mv.id.dimmed());
        }
    }
}

fn show_oracle(oracle: &Oracle) {
    println!("  ruleset:    {}", oracle.ruleset().name);
    println!("  group:      {}", group_label(oracle));
    println!("  dice:       {}", oracle.table.dice);
    println!();
    for row in &oracle.table.rows {
        let range = match row.roll {
            Some(range) if range.min == range.max => range.min.to_string(),
            Some(range) => format!("{}-{}", range.min, range.max),
            None => "-".to_string(),
        };
        println!("  {range:>7}  {}", row.text);
    }
}

fn show_package(package: &RulesPackage) {
    let kind = match package.package_type {
        PackageType::Ruleset => "ruleset",
        PackageType::Expansion => "expansion",
    };
    println!("  type:       {kind}");
    if let Some(ruleset) = &package.ruleset {
        println!("  extends:    {ruleset}");
    }
    println!("  moves:      {}", plural(package.moves.len(), "category"));
    println!("  assets:     {}", plural(package.assets.len(), "collection"));
    println!("  oracles:    {}", plural(package.oracles.len(), "collection"));
}
