//! Oracle grouping hierarchy: ruleset, then one or more collections.
//!
//! Nodes are immutable and shared through `Arc`. Parent links only point
//! upwards to nodes built earlier, so every chain ends at a ruleset.

use std::iter;
use std::sync::Arc;

use crate::model::OracleRollable;

/// Root of a grouping chain: the package an oracle came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesetGrouping {
    /// Package id.
    pub id: String,
    /// Package title, or id when untitled.
    pub name: String,
}

/// An oracle collection and the grouping that contains it.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionGrouping {
    /// Collection id.
    pub id: String,
    /// Collection name.
    pub name: String,
    /// The enclosing collection or ruleset.
    pub parent: OracleGrouping,
}

/// Either end of a parent link.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleGrouping {
    /// The root of the hierarchy.
    Ruleset(Arc<RulesetGrouping>),
    /// A collection somewhere below the root.
    Collection(Arc<CollectionGrouping>),
}

impl OracleGrouping {
    /// Id of the grouping.
    pub fn id(&self) -> &str {
        match self {
            Self::Ruleset(r) => &r.id,
            Self::Collection(c) => &c.id,
        }
    }

    /// Display name of the grouping.
    pub fn name(&self) -> &str {
        match self {
            Self::Ruleset(r) => &r.name,
            Self::Collection(c) => &c.name,
        }
    }

    /// The enclosing grouping; `None` for a ruleset.
    pub fn parent(&self) -> Option<&OracleGrouping> {
        match self {
            Self::Ruleset(_) => None,
            Self::Collection(c) => Some(&c.parent),
        }
    }
}

/// A rollable oracle table placed in the grouping hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Oracle {
    /// Table id.
    pub id: String,
    /// Table name.
    pub name: String,
    /// Nearest enclosing collection.
    pub parent: Arc<CollectionGrouping>,
    /// The table itself.
    pub table: OracleRollable,
}

impl Oracle {
    /// Place a table under a collection.
    pub fn new(table: OracleRollable, parent: Arc<CollectionGrouping>) -> Self {
        Self {
            id: table.id.clone(),
            name: table.name.clone(),
            parent,
            table,
        }
    }

    /// Enclosing collections, nearest first.
    pub fn collections(&self) -> impl Iterator<Item = &CollectionGrouping> {
        iter::successors(Some(self.parent.as_ref()), |&c| match &c.parent {
            OracleGrouping::Collection(p) => Some(p.as_ref()),
            OracleGrouping::Ruleset(_) => None,
        })
    }

    /// The ruleset at the top of the chain.
    pub fn ruleset(&self) -> &RulesetGrouping {
        let mut grouping = &self.parent.parent;
        loop {
            match grouping {
                OracleGrouping::Ruleset(r) => return r,
                OracleGrouping::Collection(c) => grouping = &c.parent,
            }
        }
    }

    /// Number of collections between the table and its ruleset.
    pub fn depth(&self) -> usize {
        self.collections().count()
    }

    /// Collection names from the outermost to the nearest.
    pub fn group_path(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections().map(|c| c.name.as_str()).collect();
        names.reverse();
        names
    }
}
