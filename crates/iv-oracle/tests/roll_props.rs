//! Round-trip and validation properties for roll results.

use std::num::NonZeroU64;

use indexmap::IndexMap;
use iv_oracle::{
    OracleBlock, RollBase, RollIssue, RollResult, parse_oracle_block, parse_roll, parse_roll_str,
    to_json_string, to_value,
};
use proptest::prelude::*;
use serde_json::json;

fn arb_base() -> impl Strategy<Value = RollBase> {
    (
        1..=100u32,
        "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
        "[A-Za-z ]{1,12}",
        proptest::option::of("[a-z\\[\\]():]{0,16}"),
        proptest::collection::vec("[A-Za-z ,]{0,12}", 0..3),
    )
        .prop_map(|(roll, table_id, table_name, raw, results)| RollBase {
            roll: NonZeroU64::new(roll.into()).unwrap(),
            table_id,
            table_name,
            raw,
            results,
        })
}

fn arb_roll() -> impl Strategy<Value = RollResult> {
    let leaf = arb_base().prop_map(RollResult::Simple);
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            (arb_base(), proptest::collection::vec(inner.clone(), 0..3))
                .prop_map(|(base, rolls)| RollResult::Multi { base, rolls }),
            (
                arb_base(),
                "[a-z {}]{0,16}",
                proptest::collection::vec(("[a-z]{1,6}", inner), 0..3),
            )
                .prop_map(|(base, template_string, entries)| RollResult::Templated {
                    base,
                    template_string,
                    template_rolls: entries.into_iter().collect::<IndexMap<_, _>>(),
                }),
        ]
    })
}

proptest! {
    #[test]
    fn serialize_then_parse_is_identity(roll in arb_roll()) {
        let value = to_value(&roll).unwrap();
        prop_assert_eq!(parse_roll(&value).unwrap(), roll.clone());

        let text = to_json_string(&roll).unwrap();
        prop_assert_eq!(parse_roll_str(&text).unwrap(), roll);
    }

    #[test]
    fn serialized_form_is_stable(roll in arb_roll()) {
        let once = to_value(&roll).unwrap();
        let twice = to_value(&parse_roll(&once).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }
}

fn leaf(roll: u64, table: &str, result: &str) -> RollResult {
    RollResult::Simple(RollBase::new(
        NonZeroU64::new(roll).unwrap(),
        table,
        table,
        [result],
    ))
}

#[test]
fn deep_multi_nesting_round_trips() {
    let mut roll = leaf(1, "bottom", "x");
    for level in 0..4 {
        roll = RollResult::Multi {
            base: RollBase::new(NonZeroU64::new(level + 2).unwrap(), "m", "Multi", ["y"]),
            rolls: vec![roll, leaf(3, "side", "z")],
        };
    }
    assert_eq!(roll.depth(), 5);
    assert_eq!(parse_roll(&to_value(&roll).unwrap()).unwrap(), roll);
}

#[test]
fn text_round_trip_survives_deep_nesting() {
    let mut roll = leaf(1, "bottom", "x");
    for level in 0..80 {
        let base = RollBase::new(NonZeroU64::new(level + 1).unwrap(), "t", "Table", ["y"]);
        roll = if level % 2 == 0 {
            RollResult::Multi {
                base,
                rolls: vec![roll],
            }
        } else {
            RollResult::Templated {
                base,
                template_string: "{{inner}}".to_string(),
                template_rolls: IndexMap::from([("inner".to_string(), roll)]),
            }
        };
    }
    assert_eq!(roll.depth(), 81);

    let text = to_json_string(&roll).unwrap();
    assert_eq!(parse_roll_str(&text).unwrap(), roll);

    let block = OracleBlock::new(roll);
    let text = serde_json::to_string(&block).unwrap();
    assert_eq!(OracleBlock::from_json(&text).unwrap(), block);
}

#[test]
fn templated_roll_preserves_key_order() {
    let mut template_rolls = IndexMap::new();
    template_rolls.insert("focus".to_string(), leaf(44, "focus", "Relic"));
    template_rolls.insert("descriptor".to_string(), leaf(7, "descriptor", "Ancient"));
    let roll = RollResult::Templated {
        base: RollBase::new(NonZeroU64::new(1).unwrap(), "name", "Name", ["Ancient Relic"]),
        template_string: "{{descriptor}} {{focus}}".to_string(),
        template_rolls,
    };

    let text = to_json_string(&roll).unwrap();
    assert!(text.find("\"focus\"").unwrap() < text.find("\"descriptor\"").unwrap());

    let parsed = parse_roll_str(&text).unwrap();
    let RollResult::Templated { template_rolls, .. } = &parsed else {
        panic!("expected templated roll");
    };
    let keys: Vec<&str> = template_rolls.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["focus", "descriptor"]);
    assert_eq!(parsed, roll);
}

#[test]
fn nested_zero_roll_is_rejected_with_its_path() {
    let payload = json!({
        "kind": "multi",
        "roll": 20,
        "tableId": "t",
        "tableName": "T",
        "results": ["a", "b"],
        "rolls": [
            { "kind": "simple", "roll": 0, "tableId": "u", "tableName": "U", "results": ["x"] }
        ]
    });
    let err = parse_roll(&payload).unwrap_err();
    assert_eq!(err.path.to_string(), "$.rolls[0].roll");
    assert_eq!(err.issue, RollIssue::NotPositive);
    assert!(err.to_string().contains("$.rolls[0].roll"));
}

#[test]
fn block_wraps_a_roll() {
    let block = OracleBlock::new(leaf(57, "core/action", "Clash")).with_question("What happens?");
    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value["question"], "What happens?");
    assert_eq!(parse_oracle_block(&value).unwrap(), block);
}
