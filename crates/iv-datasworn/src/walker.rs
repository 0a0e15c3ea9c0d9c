//! Flattening a rules package into indexed records.
//!
//! [`walk`] yields, in order: each move category followed by its moves, each
//! asset followed by the moves its abilities grant, every oracle table found
//! by [`OracleWalk`], and finally the package itself. The document is only
//! borrowed; records own clones of the parts they describe.

use std::iter;
use std::sync::Arc;

use indexmap::map::Values;
use iv_index::{Source, Sourced};

use crate::error::{DataswornResult, WalkError};
use crate::grouping::{CollectionGrouping, Oracle, OracleGrouping, RulesetGrouping};
use crate::model::{OracleCollection, OracleCollectionType, OracleRollable, RulesPackage};
use crate::record::{DataswornSourced, DataswornValue, MoveRecord};

/// Lazy sequence of records from one package.
///
/// Yields at most one error, after which it is exhausted.
pub struct Walk<'a> {
    inner: Box<dyn Iterator<Item = DataswornResult<DataswornSourced>> + 'a>,
    failed: bool,
}

impl Iterator for Walk<'_> {
    type Item = DataswornResult<DataswornSourced>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.inner.next()?;
        self.failed = item.is_err();
        Some(item)
    }
}

impl iter::FusedIterator for Walk<'_> {}

/// Flatten a package into records tagged with `source`.
///
/// Identical inputs always produce the same sequence.
pub fn walk<'a>(source: &'a Arc<Source>, package: &'a RulesPackage) -> Walk<'a> {
    let moves = package.moves.values().flat_map(move |category| {
        iter::once(Sourced::new(
            source,
            &category.id,
            DataswornValue::MoveCategory(category.clone()),
        ))
        .chain(category.contents.values().map(move |mv| {
            Sourced::new(
                source,
                &mv.id,
                DataswornValue::Move(MoveRecord::standalone(mv.clone())),
            )
        }))
    });

    let assets = package
        .assets
        .values()
        .flat_map(|collection| collection.contents.values())
        .flat_map(move |asset| {
            let granted = asset
                .abilities
                .iter()
                .flat_map(|ability| ability.moves.values())
                .map(move |mv| {
                    Sourced::new(
                        source,
                        &mv.id,
                        DataswornValue::Move(MoveRecord::from_asset(mv.clone(), &asset.id)),
                    )
                });
            iter::once(Sourced::new(
                source,
                &asset.id,
                DataswornValue::Asset(asset.clone()),
            ))
            .chain(granted)
        });

    let oracles = OracleWalk::new(package).map(move |oracle| {
        oracle.map(|oracle| {
            let id = oracle.id.clone();
            Sourced::new(source, id, DataswornValue::Oracle(oracle))
        })
    });

    let package_record = iter::once_with(move || {
        Ok(Sourced::new(
            source,
            &package.id,
            DataswornValue::RulesPackage(package.clone()),
        ))
    });

    Walk {
        inner: Box::new(
            moves
                .chain(assets)
                .map(Ok::<_, WalkError>)
                .chain(oracles)
                .chain(package_record),
        ),
        failed: false,
    }
}

/// The ruleset grouping at the root of a package's oracle hierarchy.
pub fn ruleset_grouping(package: &RulesPackage) -> OracleGrouping {
    OracleGrouping::Ruleset(Arc::new(RulesetGrouping {
        id: package.id.clone(),
        name: package.display_name().to_string(),
    }))
}

struct Frame<'a> {
    grouping: Arc<CollectionGrouping>,
    tables: Values<'a, String, OracleRollable>,
    children: Values<'a, String, OracleCollection>,
}

/// Lazy pre-order expansion of oracle collections into [`Oracle`]s.
///
/// Each collection becomes a new grouping node; its own tables are yielded
/// first, then each sub-collection is expanded beneath it. Depth is limited
/// only by the document. An unsupported collection layout yields one error
/// and ends the walk.
pub struct OracleWalk<'a> {
    parent: OracleGrouping,
    pending: std::vec::IntoIter<&'a OracleCollection>,
    stack: Vec<Frame<'a>>,
    failed: bool,
}

impl<'a> OracleWalk<'a> {
    /// Expand every top-level collection of a package under its ruleset.
    pub fn new(package: &'a RulesPackage) -> Self {
        Self::over(package.oracles.values().collect(), ruleset_grouping(package))
    }

    /// Expand a single collection under the given parent grouping.
    pub fn expand(collection: &'a OracleCollection, parent: OracleGrouping) -> Self {
        Self::over(vec![collection], parent)
    }

    fn over(collections: Vec<&'a OracleCollection>, parent: OracleGrouping) -> Self {
        Self {
            parent,
            pending: collections.into_iter(),
            stack: Vec::new(),
            failed: false,
        }
    }

    fn enter(
        &mut self,
        collection: &'a OracleCollection,
        parent: OracleGrouping,
    ) -> Option<WalkError> {
        match &collection.oracle_type {
            OracleCollectionType::Tables
            | OracleCollectionType::TableSharedRolls
            | OracleCollectionType::TableSharedText
            | OracleCollectionType::TableSharedText2
            | OracleCollectionType::TableSharedText3 => {}
            OracleCollectionType::Unsupported(other) => {
                self.failed = true;
                return Some(WalkError::UnsupportedOracleType {
                    collection: collection.id.clone(),
                    oracle_type: other.clone(),
                });
            }
        }

        self.stack.push(Frame {
            grouping: Arc::new(CollectionGrouping {
                id: collection.id.clone(),
                name: collection.name.clone(),
                parent,
            }),
            tables: collection.contents.values(),
            children: collection.collections.values(),
        });
        None
    }
}

impl Iterator for OracleWalk<'_> {
    type Item = DataswornResult<Oracle>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            let Some(frame) = self.stack.last_mut() else {
                let collection = self.pending.next()?;
                let parent = self.parent.clone();
                if let Some(err) = self.enter(collection, parent) {
                    return Some(Err(err));
                }
                continue;
            };

            if let Some(table) = frame.tables.next() {
                return Some(Ok(Oracle::new(table.clone(), Arc::clone(&frame.grouping))));
            }

            if let Some(child) = frame.children.next() {
                let parent = OracleGrouping::Collection(Arc::clone(&frame.grouping));
                if let Some(err) = self.enter(child, parent) {
                    return Some(Err(err));
                }
                continue;
            }

            self.stack.pop();
        }
    }
}

impl iter::FusedIterator for OracleWalk<'_> {}
