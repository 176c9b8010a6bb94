//! Error types for the refsel data model.

use thiserror::Error;

/// Errors raised while constructing or parsing data model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The ref type name is not one of `branch`, `tag`, `commit`.
    #[error("unknown ref type: {0}")]
    UnknownRefType(String),

    /// A ref id must be non-empty.
    #[error("ref id must not be empty")]
    EmptyRefId,

    /// A `type:id` ref string is missing its separator.
    #[error("malformed ref {input:?}: expected <type>:<id>")]
    MalformedRef { input: String },
}

/// Convenience type alias for data model operations.
pub type TypeResult<T> = std::result::Result<T, TypeError>;
