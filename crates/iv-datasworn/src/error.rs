//! Error types for walking and ingesting rules packages.

use iv_index::IndexError;
use thiserror::Error;

/// Result type for walker operations.
pub type DataswornResult<T> = Result<T, WalkError>;

/// Structural problems found while walking a package.
///
/// Any of these means the document does not match the supported schema;
/// the whole document should be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// An oracle collection declares a layout this crate does not know.
    #[error("unsupported oracle type \"{oracle_type}\" in collection {collection}")]
    UnsupportedOracleType {
        /// Id of the offending collection.
        collection: String,
        /// The declared layout.
        oracle_type: String,
    },
}

/// Errors from a one-call ingest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatastoreError {
    /// The package could not be walked; nothing was indexed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// The records could not be indexed; nothing was indexed.
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// A record kind name that is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown record kind: {0}")]
pub struct UnknownKind(pub String);
