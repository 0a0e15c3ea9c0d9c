//! Indexed record kinds and payloads.

use std::fmt;
use std::str::FromStr;

use iv_index::{DataIndexer, Kinded, Sourced};
use serde::{Deserialize, Serialize};

use crate::error::UnknownKind;
use crate::grouping::Oracle;
use crate::model::{Asset, Move, MoveCategory, RulesPackage};

/// The closed set of record kinds produced by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataswornKind {
    /// A move category.
    MoveCategory,
    /// A standalone or asset-granted move.
    Move,
    /// An asset card.
    Asset,
    /// An oracle table.
    Oracle,
    /// The package document itself.
    RulesPackage,
}

impl DataswornKind {
    /// Every kind, in walk order.
    pub const ALL: [Self; 5] = [
        Self::MoveCategory,
        Self::Move,
        Self::Asset,
        Self::Oracle,
        Self::RulesPackage,
    ];

    /// The snake_case name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveCategory => "move_category",
            Self::Move => "move",
            Self::Asset => "asset",
            Self::Oracle => "oracle",
            Self::RulesPackage => "rules_package",
        }
    }
}

impl fmt::Display for DataswornKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataswornKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Where a move record came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOrigin {
    /// The asset granting the move; `None` for standalone moves.
    pub asset_id: Option<String>,
}

/// A move together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    /// The move as written in the package.
    pub definition: Move,
    /// Standalone or asset-granted.
    pub origin: MoveOrigin,
}

impl MoveRecord {
    /// A move listed in a move category.
    pub fn standalone(definition: Move) -> Self {
        Self {
            definition,
            origin: MoveOrigin::default(),
        }
    }

    /// A move granted by an asset ability.
    pub fn from_asset(definition: Move, asset_id: &str) -> Self {
        Self {
            definition,
            origin: MoveOrigin {
                asset_id: Some(asset_id.to_string()),
            },
        }
    }
}

/// Payload of an indexed record.
#[derive(Debug, Clone, PartialEq)]
pub enum DataswornValue {
    /// A move category.
    MoveCategory(MoveCategory),
    /// A move.
    Move(MoveRecord),
    /// An asset.
    Asset(Asset),
    /// An oracle table.
    Oracle(Oracle),
    /// The package document.
    RulesPackage(RulesPackage),
}

impl Kinded for DataswornValue {
    type Kind = DataswornKind;

    fn kind(&self) -> DataswornKind {
        match self {
            Self::MoveCategory(_) => DataswornKind::MoveCategory,
            Self::Move(_) => DataswornKind::Move,
            Self::Asset(_) => DataswornKind::Asset,
            Self::Oracle(_) => DataswornKind::Oracle,
            Self::RulesPackage(_) => DataswornKind::RulesPackage,
        }
    }
}

impl DataswornValue {
    /// Display name of the payload.
    pub fn name(&self) -> &str {
        match self {
            Self::MoveCategory(c) => &c.name,
            Self::Move(m) => &m.definition.name,
            Self::Asset(a) => &a.name,
            Self::Oracle(o) => &o.name,
            Self::RulesPackage(p) => p.display_name(),
        }
    }

    /// The move payload, if this is a move.
    pub fn as_move(&self) -> Option<&MoveRecord> {
        match self {
            Self::Move(m) => Some(m),
            _ => None,
        }
    }

    /// The asset payload, if this is an asset.
    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Self::Asset(a) => Some(a),
            _ => None,
        }
    }

    /// The oracle payload, if this is an oracle.
    pub fn as_oracle(&self) -> Option<&Oracle> {
        match self {
            Self::Oracle(o) => Some(o),
            _ => None,
        }
    }

    /// The package payload, if this is a package.
    pub fn as_rules_package(&self) -> Option<&RulesPackage> {
        match self {
            Self::RulesPackage(p) => Some(p),
            _ => None,
        }
    }
}

/// A record produced by the walker.
pub type DataswornSourced = Sourced<DataswornValue>;

/// An index over walker records.
pub type DataswornIndexer = DataIndexer<DataswornValue>;
