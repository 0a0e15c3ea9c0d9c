use std::fs;
use std::path::Path;

use colored::Colorize;
use iv_oracle::{RollResult, parse_oracle_block, parse_roll, read_json};
use serde_json::Value;
use tracing::warn;

use super::plural;

pub fn run(file: &Path) -> Result<(), String> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let value = read_json(&text)
        .map_err(|e| format!("{}: invalid JSON: {e}", file.display()))?;

    // An oracle block wraps the roll under "roll"
    let is_block = value.get("kind").is_none() && value.get("roll").is_some_and(Value::is_object);
    let (roll, question) = if is_block {
        let block = parse_oracle_block(&value).map_err(|e| format!("{}: {e}", file.display()))?;
        (block.roll, block.question)
    } else {
        let roll = parse_roll(&value).map_err(|e| format!("{}: {e}", file.display()))?;
        (roll, None)
    };

    if let Some(question) = question {
        println!("  {} {}", "Q:".bold(), question);
    }
    print_roll(&roll);

    println!();
    println!(
        "  valid {} roll: {}, depth {}",
        roll.kind(),
        plural(roll.walk().count(), "table roll"),
        roll.depth()
    );

    Ok(())
}

fn print_roll(roll: &RollResult) {
    for (depth, sub) in roll.walk() {
        let indent = "  ".repeat(depth + 1);
        println!("{indent}{sub} {}", format!("[{}]", sub.kind()).dimmed());
        if let RollResult::Templated {
            template_string, ..
        } = sub
        {
            println!("{indent}  template: {template_string}");
            if let Some(mismatch) = sub.template_mismatches()
                && !mismatch.is_empty()
            {
                warn!(
                    table = %sub.base().table_id,
                    missing = ?mismatch.missing,
                    unused = ?mismatch.unused,
                    "template placeholders do not match template rolls"
                );
            }
        }
    }
}
