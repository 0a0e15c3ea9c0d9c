//! The oracle block: a roll together with the question that prompted it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{OracleResult, RollIssue, RollValidationError};
use crate::parse::{parse_roll_at, read_json};
use crate::path::RollPath;
use crate::roll::RollResult;

/// A recorded oracle consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OracleBlock {
    /// The roll made.
    pub roll: RollResult,
    /// The question asked, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl OracleBlock {
    /// A block without a question.
    pub fn new(roll: RollResult) -> Self {
        Self { roll, question: None }
    }

    /// Attach the question.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Parse JSON text as a block.
    pub fn from_json(text: &str) -> OracleResult<Self> {
        let value = read_json(text)?;
        Ok(parse_oracle_block(&value)?)
    }
}

/// Validate a JSON value as an oracle block.
///
/// Fields other than `roll` and `question` are ignored.
pub fn parse_oracle_block(value: &Value) -> Result<OracleBlock, RollValidationError> {
    let root = RollPath::root();
    let object = value
        .as_object()
        .ok_or_else(|| RollValidationError::new(root.clone(), RollIssue::NotAnObject))?;

    let roll_value = object
        .get("roll")
        .ok_or_else(|| RollValidationError::new(root.clone(), RollIssue::MissingField("roll")))?;
    let roll = parse_roll_at(roll_value, &root.field("roll"))?;

    let question = match object.get("question") {
        None => None,
        Some(q) => Some(
            q.as_str()
                .ok_or_else(|| {
                    RollValidationError::new(
                        root.field("question"),
                        RollIssue::WrongType { expected: "a string" },
                    )
                })?
                .to_string(),
        ),
    };

    Ok(OracleBlock { roll, question })
}

impl<'de> Deserialize<'de> for OracleBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(serde_stacker::Deserializer::new(deserializer))?;
        parse_oracle_block(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn roll_json() -> Value {
        json!({
            "kind": "simple",
            "roll": 12,
            "tableId": "core/theme",
            "tableName": "Theme",
            "results": ["Risk"],
        })
    }

    #[test]
    fn parses_block_with_question() {
        let block = parse_oracle_block(&json!({ "roll": roll_json(), "question": "Who waits?" })).unwrap();
        assert_eq!(block.question.as_deref(), Some("Who waits?"));
        assert_eq!(block.roll.base().table_id, "core/theme");
    }

    #[test]
    fn question_is_optional_and_omitted() {
        let block = parse_oracle_block(&json!({ "roll": roll_json() })).unwrap();
        assert_eq!(block.question, None);
        let json = serde_json::to_value(&block).unwrap();
        assert!(json.get("question").is_none());
    }

    #[test]
    fn nested_roll_errors_are_prefixed() {
        let mut roll = roll_json();
        roll["roll"] = json!(0);
        let err = parse_oracle_block(&json!({ "roll": roll })).unwrap_err();
        assert_eq!(err.path.to_string(), "$.roll.roll");
        assert_eq!(err.issue, RollIssue::NotPositive);
    }

    #[test]
    fn ignores_unknown_block_fields() {
        let block = parse_oracle_block(&json!({ "roll": roll_json(), "answer": "yes" })).unwrap();
        assert_eq!(block, parse_oracle_block(&json!({ "roll": roll_json() })).unwrap());
    }

    #[test]
    fn round_trips_through_text() {
        let block = OracleBlock::new(parse_oracle_block(&json!({ "roll": roll_json() })).unwrap().roll)
            .with_question("What now?");
        let text = serde_json::to_string(&block).unwrap();
        assert_eq!(OracleBlock::from_json(&text).unwrap(), block);
    }
}
