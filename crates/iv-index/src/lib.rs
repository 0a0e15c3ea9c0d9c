//! Multi-source record index for Iron Vault.
//!
//! Records arrive in batches from independent [`Source`]s (bundled rulesets,
//! homebrew files). Several sources may contribute a record under the same id;
//! the [`DataIndexer`] keeps every candidate and exposes the one with the
//! highest source priority. It performs no I/O and never logs failures, which
//! are returned to the caller as [`IndexError`].

/// Tie-break policy and other indexer settings.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// The multi-source indexer.
pub mod indexer;
/// Content origins and their tags.
pub mod source;
/// Provenance-tagged records and the kind trait.
pub mod sourced;

/// Re-export configuration types.
pub use config::{IndexConfig, TieBreak};
/// Re-export error types.
pub use error::{IndexError, IndexResult};
/// Re-export the indexer.
pub use indexer::DataIndexer;
/// Re-export source types.
pub use source::{RULESET_TAG, Source, SourceTag};
/// Re-export record types.
pub use sourced::{Kinded, Sourced};
