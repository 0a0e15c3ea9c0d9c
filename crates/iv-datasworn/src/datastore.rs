//! One-call ingestion and typed views over an index of walker records.

use std::sync::Arc;

use iv_index::{IndexConfig, Source};
use tracing::debug;

use crate::browser::{OracleTree, oracle_tree};
use crate::error::DatastoreError;
use crate::grouping::Oracle;
use crate::model::{Asset, MoveCategory, RulesPackage};
use crate::record::{DataswornIndexer, DataswornKind, DataswornValue, MoveRecord};
use crate::walker::walk;

/// Rules content from every ingested source.
#[derive(Debug, Default)]
pub struct Datastore {
    index: DataswornIndexer,
}

impl Datastore {
    /// Create an empty datastore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty datastore with a custom index configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            index: DataswornIndexer::with_config(config),
        }
    }

    /// Walk a package and index every record it yields.
    ///
    /// Returns the number of records walked. If the walk fails or the source
    /// is still registered, nothing is indexed.
    pub fn ingest(
        &mut self,
        source: &Arc<Source>,
        package: &RulesPackage,
    ) -> Result<usize, DatastoreError> {
        let records = walk(source, package).collect::<Result<Vec<_>, _>>()?;
        let count = records.len();
        self.index.add_source(source, records)?;
        debug!(path = %source.path, package = %package.id, records = count, "package ingested");
        Ok(count)
    }

    /// Drop everything contributed by the source at `path`.
    pub fn retract(&mut self, path: &str) -> usize {
        self.index.remove_source(path)
    }

    /// The underlying index.
    pub fn index(&self) -> &DataswornIndexer {
        &self.index
    }

    /// Winning move categories.
    pub fn move_categories(&self) -> impl Iterator<Item = &MoveCategory> {
        self.index
            .by_kind(DataswornKind::MoveCategory)
            .filter_map(|r| match &r.value {
                DataswornValue::MoveCategory(c) => Some(c),
                _ => None,
            })
    }

    /// Winning moves, standalone and asset-granted.
    pub fn moves(&self) -> impl Iterator<Item = &MoveRecord> {
        self.index
            .by_kind(DataswornKind::Move)
            .filter_map(|r| r.value.as_move())
    }

    /// The winning move for an id.
    pub fn move_by_id(&self, id: &str) -> Option<&MoveRecord> {
        self.index.get(id).and_then(|r| r.value.as_move())
    }

    /// Winning assets.
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.index
            .by_kind(DataswornKind::Asset)
            .filter_map(|r| r.value.as_asset())
    }

    /// The winning asset for an id.
    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.index.get(id).and_then(|r| r.value.as_asset())
    }

    /// Winning oracles.
    pub fn oracles(&self) -> impl Iterator<Item = &Oracle> {
        self.index
            .by_kind(DataswornKind::Oracle)
            .filter_map(|r| r.value.as_oracle())
    }

    /// The winning oracle for an id.
    pub fn oracle(&self, id: &str) -> Option<&Oracle> {
        self.index.get(id).and_then(|r| r.value.as_oracle())
    }

    /// Winning package documents.
    pub fn rules_packages(&self) -> impl Iterator<Item = &RulesPackage> {
        self.index
            .by_kind(DataswornKind::RulesPackage)
            .filter_map(|r| r.value.as_rules_package())
    }

    /// Winning oracles grouped for browsing.
    pub fn oracle_tree(&self) -> OracleTree<'_> {
        oracle_tree(self.oracles())
    }
}
