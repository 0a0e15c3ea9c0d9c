use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::source::Source;

/// A payload that belongs to one of a closed set of record kinds.
///
/// The indexer stores every kind in one table; the kind is read back from the
/// payload so that a record's kind and value can never disagree.
pub trait Kinded {
    /// The closed set of kinds.
    type Kind: Copy + Eq + Hash + Ord + Debug;

    /// The kind of this payload.
    fn kind(&self) -> Self::Kind;
}

/// A record tagged with the source that contributed it.
#[derive(Debug, Clone)]
pub struct Sourced<V: Kinded> {
    /// The contributing source.
    pub source: Arc<Source>,
    /// Record id, unique within one source.
    pub id: String,
    /// Kind-specific payload.
    pub value: V,
}

impl<V: Kinded> Sourced<V> {
    /// Tag a payload with its source and id.
    pub fn new(source: &Arc<Source>, id: impl Into<String>, value: V) -> Self {
        Self {
            source: Arc::clone(source),
            id: id.into(),
            value,
        }
    }

    /// The record kind, derived from the payload.
    pub fn kind(&self) -> V::Kind {
        self.value.kind()
    }

    /// Priority of the contributing source.
    pub fn priority(&self) -> i32 {
        self.source.priority
    }
}
