//! Rules packages for Iron Vault: document model, record walker, oracle
//! grouping hierarchy and a datastore that indexes packages from many
//! sources.
//!
//! Typical use: parse a document into a [`RulesPackage`], then hand it to
//! [`Datastore::ingest`] together with the [`Source`](iv_index::Source) it
//! came from. [`walk`] is available separately when the caller wants the
//! raw record sequence.

pub mod browser;
pub mod datastore;
pub mod error;
pub mod grouping;
pub mod model;
pub mod record;
pub mod walker;

pub use browser::{OracleTree, oracle_tree};
pub use datastore::Datastore;
pub use error::{DatastoreError, DataswornResult, UnknownKind, WalkError};
pub use grouping::{CollectionGrouping, Oracle, OracleGrouping, RulesetGrouping};
pub use model::{Asset, Move, MoveCategory, MoveKind, OracleCollection, OracleRollable, RulesPackage};
pub use record::{
    DataswornIndexer, DataswornKind, DataswornSourced, DataswornValue, MoveOrigin, MoveRecord,
};
pub use walker::{OracleWalk, Walk, walk};
