//! Oracle roll results for Iron Vault.
//!
//! A [`RollResult`] records the outcome of rolling one or more oracle tables.
//! It is recursive: a `multi` roll holds an ordered list of sub-rolls, and a
//! `templated` roll holds named sub-rolls substituted into a template string.
//! [`parse_roll`] validates untrusted JSON and reports where validation
//! failed; serialization is its inverse.

pub mod block;
pub mod error;
pub mod parse;
pub mod path;
pub mod roll;
pub mod template;

pub use block::{OracleBlock, parse_oracle_block};
pub use error::{OracleError, OracleResult, RollIssue, RollValidationError};
pub use parse::{parse_roll, parse_roll_str, read_json, to_json_string, to_value};
pub use path::{PathSegment, RollPath};
pub use roll::{RollBase, RollKind, RollResult};
pub use template::{TemplateMismatch, placeholders};
