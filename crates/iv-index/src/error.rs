/// Alias for `Result<T, IndexError>`.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur when mutating an index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The source path is already registered and still holds records.
    /// It must be removed before it can be added again.
    #[error("source already registered: \"{path}\"")]
    DuplicateSource {
        /// Path of the offending source.
        path: String,
    },

    /// A record in the batch is tagged with a different source than the one
    /// being added.
    #[error("record \"{id}\" is tagged with source \"{found}\", expected \"{expected}\"")]
    SourceMismatch {
        /// Id of the offending record.
        id: String,
        /// Path of the source passed to `add_source`.
        expected: String,
        /// Path of the source the record carries.
        found: String,
    },
}
