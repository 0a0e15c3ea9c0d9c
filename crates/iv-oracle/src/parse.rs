//! Strict validation from JSON into [`RollResult`].
//!
//! Every field is checked against the kind declared in `kind`; fields that
//! belong to another kind are rejected, fields no kind defines are ignored.
//! Failures carry the path of the offending value. Nesting depth is bounded
//! only by memory.

use std::num::NonZeroU64;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{OracleResult, RollIssue, RollValidationError};
use crate::path::RollPath;
use crate::roll::{RollBase, RollKind, RollResult};

/// Wire field names.
pub(crate) mod field {
    pub const KIND: &str = "kind";
    pub const ROLL: &str = "roll";
    pub const TABLE_ID: &str = "tableId";
    pub const TABLE_NAME: &str = "tableName";
    pub const RAW: &str = "raw";
    pub const RESULTS: &str = "results";
    pub const ROLLS: &str = "rolls";
    pub const TEMPLATE_STRING: &str = "templateString";
    pub const TEMPLATE_ROLLS: &str = "templateRolls";

    pub const BASE: [&str; 6] = [KIND, ROLL, TABLE_ID, TABLE_NAME, RAW, RESULTS];
    pub const EXTRA: [&str; 3] = [ROLLS, TEMPLATE_STRING, TEMPLATE_ROLLS];
}

/// Stack kept free before recursing into a nested roll.
pub(crate) const STACK_RED_ZONE: usize = 64 * 1024;

/// Stack allocated when the red zone is reached.
pub(crate) const STACK_GROWTH: usize = 1024 * 1024;

/// Largest float accepted as an integral roll (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

type Validated<T> = Result<T, RollValidationError>;

/// Read JSON text into a value without a nesting limit.
///
/// Deeply nested rolls produced by [`to_json_string`] read back intact; the
/// stack grows on demand instead.
pub fn read_json(text: &str) -> serde_json::Result<Value> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

/// Validate a JSON value as a roll result.
pub fn parse_roll(value: &Value) -> Result<RollResult, RollValidationError> {
    parse_roll_at(value, &RollPath::root())
}

/// Parse JSON text as a roll result.
pub fn parse_roll_str(text: &str) -> OracleResult<RollResult> {
    let value = read_json(text)?;
    Ok(parse_roll(&value)?)
}

/// Serialize a roll result into a JSON value.
pub fn to_value(roll: &RollResult) -> OracleResult<Value> {
    Ok(serde_json::to_value(roll)?)
}

/// Serialize a roll result into compact JSON text.
pub fn to_json_string(roll: &RollResult) -> OracleResult<String> {
    Ok(serde_json::to_string(roll)?)
}

pub(crate) fn parse_roll_at(value: &Value, path: &RollPath) -> Validated<RollResult> {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || parse_object(value, path))
}

fn parse_object(value: &Value, path: &RollPath) -> Validated<RollResult> {
    let object = value
        .as_object()
        .ok_or_else(|| RollValidationError::new(path.clone(), RollIssue::NotAnObject))?;

    let kind = parse_kind(object, path)?;
    reject_unexpected(object, kind, path)?;
    let base = parse_base(object, path)?;

    match kind {
        RollKind::Simple => Ok(RollResult::Simple(base)),
        RollKind::Multi => {
            let list_path = path.field(field::ROLLS);
            let items = required(object, field::ROLLS, path)?
                .as_array()
                .ok_or_else(|| wrong_type(&list_path, "an array of rolls"))?;
            let rolls = items
                .iter()
                .enumerate()
                .map(|(i, item)| parse_roll_at(item, &list_path.index(i)))
                .collect::<Validated<Vec<_>>>()?;
            Ok(RollResult::Multi { base, rolls })
        }
        RollKind::Templated => {
            let template_string = required_string(object, field::TEMPLATE_STRING, path)?;
            let map_path = path.field(field::TEMPLATE_ROLLS);
            let entries = required(object, field::TEMPLATE_ROLLS, path)?
                .as_object()
                .ok_or_else(|| wrong_type(&map_path, "an object of rolls"))?;
            let mut template_rolls = IndexMap::with_capacity(entries.len());
            for (key, item) in entries {
                if key.is_empty() {
                    return Err(RollValidationError::new(map_path, RollIssue::EmptyKey));
                }
                template_rolls.insert(key.clone(), parse_roll_at(item, &map_path.key(key))?);
            }
            Ok(RollResult::Templated {
                base,
                template_string,
                template_rolls,
            })
        }
    }
}

fn parse_kind(object: &Map<String, Value>, path: &RollPath) -> Validated<RollKind> {
    let kind_path = path.field(field::KIND);
    let tag = required(object, field::KIND, path)?
        .as_str()
        .ok_or_else(|| wrong_type(&kind_path, "a string"))?;
    match tag {
        "simple" => Ok(RollKind::Simple),
        "multi" => Ok(RollKind::Multi),
        "templated" => Ok(RollKind::Templated),
        other => Err(RollValidationError::new(
            kind_path,
            RollIssue::UnknownKind(other.to_string()),
        )),
    }
}

/// Whether a field defined by some kind is valid on `kind`.
fn allowed(kind: RollKind, name: &str) -> bool {
    match kind {
        RollKind::Simple => false,
        RollKind::Multi => name == field::ROLLS,
        RollKind::Templated => name == field::TEMPLATE_STRING || name == field::TEMPLATE_ROLLS,
    }
}

fn reject_unexpected(object: &Map<String, Value>, kind: RollKind, path: &RollPath) -> Validated<()> {
    let misplaced = object
        .keys()
        .find(|name| field::EXTRA.contains(&name.as_str()) && !allowed(kind, name));
    match misplaced {
        Some(name) => Err(RollValidationError::new(
            path.field(name),
            RollIssue::UnexpectedField {
                field: name.clone(),
                kind,
            },
        )),
        None => Ok(()),
    }
}

fn parse_base(object: &Map<String, Value>, path: &RollPath) -> Validated<RollBase> {
    let roll_path = path.field(field::ROLL);
    let roll_value = required(object, field::ROLL, path)?;
    let roll = integral_roll(roll_value, &roll_path)?;
    let roll =
        NonZeroU64::new(roll).ok_or_else(|| RollValidationError::new(roll_path, RollIssue::NotPositive))?;

    let table_id = required_string(object, field::TABLE_ID, path)?;
    let table_name = required_string(object, field::TABLE_NAME, path)?;

    let raw = match object.get(field::RAW) {
        None => None,
        Some(value) => Some(
            value
                .as_str()
                .ok_or_else(|| wrong_type(&path.field(field::RAW), "a string"))?
                .to_string(),
        ),
    };

    let results_path = path.field(field::RESULTS);
    let results = required(object, field::RESULTS, path)?
        .as_array()
        .ok_or_else(|| wrong_type(&results_path, "an array of strings"))?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| wrong_type(&results_path.index(i), "a string"))
        })
        .collect::<Validated<Vec<_>>>()?;

    Ok(RollBase {
        roll,
        table_id,
        table_name,
        raw,
        results,
    })
}

/// A non-negative JSON integer; integral floats such as `3.0` count.
fn integral_roll(value: &Value, path: &RollPath) -> Validated<u64> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 => {
            if f > MAX_EXACT_FLOAT {
                Err(RollValidationError::new(path.clone(), RollIssue::OutOfRange))
            } else {
                // Exact: integral and below 2^53
                Ok(f as u64)
            }
        }
        _ => Err(wrong_type(path, "a positive integer")),
    }
}

fn required<'v>(
    object: &'v Map<String, Value>,
    name: &'static str,
    path: &RollPath,
) -> Validated<&'v Value> {
    object
        .get(name)
        .ok_or_else(|| RollValidationError::new(path.clone(), RollIssue::MissingField(name)))
}

fn required_string(object: &Map<String, Value>, name: &'static str, path: &RollPath) -> Validated<String> {
    required(object, name, path)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_type(&path.field(name), "a string"))
}

fn wrong_type(path: &RollPath, expected: &'static str) -> RollValidationError {
    RollValidationError::new(path.clone(), RollIssue::WrongType { expected })
}
