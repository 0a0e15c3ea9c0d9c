//! Rules-package document model.
//!
//! A subset of the Datasworn JSON format: enough to flatten moves, assets and
//! oracle tables into records. Documents are assumed to be schema-validated
//! upstream, so unknown fields are ignored. Maps keep document order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whether a package is a complete ruleset or extends one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    /// A standalone ruleset.
    Ruleset,
    /// Content layered on top of another ruleset.
    Expansion,
}

/// A complete or partial document of game content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesPackage {
    /// Package id (e.g. `starforged`).
    #[serde(rename = "_id")]
    pub id: String,
    /// Ruleset or expansion.
    #[serde(rename = "type")]
    pub package_type: PackageType,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The ruleset an expansion extends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<String>,
    /// Move categories.
    #[serde(default)]
    pub moves: IndexMap<String, MoveCategory>,
    /// Asset collections.
    #[serde(default)]
    pub assets: IndexMap<String, AssetCollection>,
    /// Top-level oracle collections.
    #[serde(default)]
    pub oracles: IndexMap<String, OracleCollection>,
}

impl RulesPackage {
    /// Parse a package from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Title, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// A named group of moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCategory {
    /// Category id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Moves in this category.
    #[serde(default)]
    pub contents: IndexMap<String, Move>,
}

/// How a move is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollType {
    /// Roll the action die against two challenge dice.
    ActionRoll,
    /// Compare a progress score against two challenge dice.
    ProgressRoll,
    /// Roll against a special track (bonds, legacies).
    SpecialTrack,
    /// No roll.
    NoRoll,
}

/// Coarse classification of moves for pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Action roll moves.
    Action,
    /// Progress roll moves.
    Progress,
    /// Special-track and no-roll moves.
    Other,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "Action"),
            Self::Progress => write!(f, "Progress"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// What prompts a move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveTrigger {
    /// Trigger text.
    #[serde(default)]
    pub text: String,
}

/// A single move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Move id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// How the move is rolled.
    pub roll_type: RollType,
    /// When the move applies.
    #[serde(default)]
    pub trigger: MoveTrigger,
    /// Full move text.
    #[serde(default)]
    pub text: String,
}

impl Move {
    /// Classify the move by its roll type.
    pub fn kind(&self) -> MoveKind {
        match self.roll_type {
            RollType::ActionRoll => MoveKind::Action,
            RollType::ProgressRoll => MoveKind::Progress,
            RollType::SpecialTrack | RollType::NoRoll => MoveKind::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// A named group of assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCollection {
    /// Collection id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Assets in this collection.
    #[serde(default)]
    pub contents: IndexMap<String, Asset>,
}

/// An asset card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category label shown on the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Abilities, in card order.
    #[serde(default)]
    pub abilities: Vec<AssetAbility>,
}

/// One ability on an asset card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAbility {
    /// Ability text.
    #[serde(default)]
    pub text: String,
    /// Whether the ability starts marked.
    #[serde(default)]
    pub enabled: bool,
    /// Moves granted by this ability.
    #[serde(default)]
    pub moves: IndexMap<String, Move>,
}

// ---------------------------------------------------------------------------
// Oracles
// ---------------------------------------------------------------------------

/// Layout of an oracle collection.
///
/// Unknown layouts are kept as [`Unsupported`](Self::Unsupported) so the
/// walker can reject them with the offending collection's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OracleCollectionType {
    /// Independent tables, optionally with sub-collections.
    Tables,
    /// Tables sharing one roll.
    TableSharedRolls,
    /// Several text columns sharing one table.
    TableSharedText,
    /// Two text columns sharing one table.
    TableSharedText2,
    /// Three text columns sharing one table.
    TableSharedText3,
    /// A layout this crate does not know.
    Unsupported(String),
}

impl From<String> for OracleCollectionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "tables" => Self::Tables,
            "table_shared_rolls" => Self::TableSharedRolls,
            "table_shared_text" => Self::TableSharedText,
            "table_shared_text2" => Self::TableSharedText2,
            "table_shared_text3" => Self::TableSharedText3,
            _ => Self::Unsupported(s),
        }
    }
}

impl From<OracleCollectionType> for String {
    fn from(t: OracleCollectionType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for OracleCollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tables => write!(f, "tables"),
            Self::TableSharedRolls => write!(f, "table_shared_rolls"),
            Self::TableSharedText => write!(f, "table_shared_text"),
            Self::TableSharedText2 => write!(f, "table_shared_text2"),
            Self::TableSharedText3 => write!(f, "table_shared_text3"),
            Self::Unsupported(s) => write!(f, "{s}"),
        }
    }
}

/// A group of oracle tables, possibly nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleCollection {
    /// Collection id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Layout of the collection.
    pub oracle_type: OracleCollectionType,
    /// Tables directly in this collection.
    #[serde(default)]
    pub contents: IndexMap<String, OracleRollable>,
    /// Nested collections.
    #[serde(default)]
    pub collections: IndexMap<String, OracleCollection>,
}

fn default_dice() -> String {
    "1d100".to_string()
}

/// A single rollable table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleRollable {
    /// Table id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Table layout (e.g. `table_text`), not interpreted here.
    #[serde(default)]
    pub oracle_type: String,
    /// Dice expression for the table.
    #[serde(default = "default_dice")]
    pub dice: String,
    /// Rows, in table order.
    #[serde(default)]
    pub rows: Vec<OracleRow>,
}

impl OracleRollable {
    /// The row whose range contains `roll`.
    pub fn lookup(&self, roll: u32) -> Option<&OracleRow> {
        self.rows
            .iter()
            .find(|row| row.roll.is_some_and(|range| range.contains(roll)))
    }
}

/// Inclusive roll range of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    /// Lowest matching roll.
    pub min: u32,
    /// Highest matching roll.
    pub max: u32,
}

impl RowRange {
    /// Whether the roll falls in this range.
    pub fn contains(&self, roll: u32) -> bool {
        (self.min..=self.max).contains(&roll)
    }
}

/// One row of an oracle table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleRow {
    /// Matching roll range; rows without one are never rolled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll: Option<RowRange>,
    /// Result text.
    #[serde(default)]
    pub text: String,
}
