//! The roll result types.

use std::fmt;
use std::num::NonZeroU64;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::parse::{STACK_GROWTH, STACK_RED_ZONE, field, parse_roll};

/// The variant tag of a [`RollResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollKind {
    /// A single table roll.
    Simple,
    /// A roll whose result is an ordered list of sub-rolls.
    Multi,
    /// A roll whose result fills named slots in a template.
    Templated,
}

impl RollKind {
    /// Wire name used in the `kind` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Multi => "multi",
            Self::Templated => "templated",
        }
    }
}

impl fmt::Display for RollKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every roll kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollBase {
    /// The value rolled on the table.
    pub roll: NonZeroU64,
    /// Id of the table rolled.
    pub table_id: String,
    /// Display name of the table rolled.
    pub table_name: String,
    /// Unprocessed row text, when it differs from the results.
    pub raw: Option<String>,
    /// Result strings, in row order.
    pub results: Vec<String>,
}

impl RollBase {
    /// A base with no raw text.
    pub fn new(
        roll: NonZeroU64,
        table_id: impl Into<String>,
        table_name: impl Into<String>,
        results: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            roll,
            table_id: table_id.into(),
            table_name: table_name.into(),
            raw: None,
            results: results.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the raw row text.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

/// The outcome of rolling an oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollResult {
    /// A single table roll.
    Simple(RollBase),
    /// A roll that produced further rolls, in order.
    Multi {
        /// Shared fields.
        base: RollBase,
        /// Sub-rolls in the order they were made.
        rolls: Vec<RollResult>,
    },
    /// A roll whose result is a template with named sub-rolls.
    Templated {
        /// Shared fields.
        base: RollBase,
        /// Template text with `{{name}}` placeholders.
        template_string: String,
        /// Sub-rolls by placeholder name, in insertion order.
        template_rolls: IndexMap<String, RollResult>,
    },
}

impl RollResult {
    /// The shared fields.
    pub fn base(&self) -> &RollBase {
        match self {
            Self::Simple(base) | Self::Multi { base, .. } | Self::Templated { base, .. } => base,
        }
    }

    /// The variant tag.
    pub fn kind(&self) -> RollKind {
        match self {
            Self::Simple(_) => RollKind::Simple,
            Self::Multi { .. } => RollKind::Multi,
            Self::Templated { .. } => RollKind::Templated,
        }
    }

    /// Nesting depth; a roll without sub-rolls has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().map(Self::depth).max().unwrap_or(0)
    }

    /// Immediate sub-rolls, in order.
    pub fn children(&self) -> Box<dyn Iterator<Item = &RollResult> + '_> {
        match self {
            Self::Simple(_) => Box::new(std::iter::empty()),
            Self::Multi { rolls, .. } => Box::new(rolls.iter()),
            Self::Templated { template_rolls, .. } => Box::new(template_rolls.values()),
        }
    }

    /// Pre-order traversal of this roll and all sub-rolls, with depth
    /// (the root is at 0).
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

/// Iterator returned by [`RollResult::walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a RollResult)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a RollResult);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, roll) = self.stack.pop()?;
        let children: Vec<_> = roll.children().collect();
        self.stack
            .extend(children.into_iter().rev().map(|child| (depth + 1, child)));
        Some((depth, roll))
    }
}

/// One-line summary: `Table (roll): result, result`.
impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.base();
        write!(
            f,
            "{} ({}): {}",
            base.table_name,
            base.roll,
            base.results.join(", ")
        )
    }
}

impl Serialize for RollResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.serialize_fields(serializer))
    }
}

impl RollResult {
    fn serialize_fields<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let base = self.base();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(field::KIND, self.kind().as_str())?;
        map.serialize_entry(field::ROLL, &base.roll)?;
        map.serialize_entry(field::TABLE_ID, &base.table_id)?;
        map.serialize_entry(field::TABLE_NAME, &base.table_name)?;
        if let Some(raw) = &base.raw {
            map.serialize_entry(field::RAW, raw)?;
        }
        map.serialize_entry(field::RESULTS, &base.results)?;
        match self {
            Self::Simple(_) => {}
            Self::Multi { rolls, .. } => map.serialize_entry(field::ROLLS, rolls)?,
            Self::Templated {
                template_string,
                template_rolls,
                ..
            } => {
                map.serialize_entry(field::TEMPLATE_STRING, template_string)?;
                map.serialize_entry(field::TEMPLATE_ROLLS, template_rolls)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RollResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(serde_stacker::Deserializer::new(deserializer))?;
        parse_roll(&value).map_err(serde::de::Error::custom)
    }
}
