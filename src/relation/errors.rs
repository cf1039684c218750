//! Relation metadata errors
//!
//! Raised while defining or loading relations, never while building
//! conditions.

use thiserror::Error;

/// Result type for relation operations
pub type RelationResult<T> = Result<T, RelationError>;

/// Relation definition and loading errors
#[derive(Debug, Error)]
pub enum RelationError {
    /// Relation has a blank name
    #[error("Relation name must not be empty")]
    EmptyName,

    /// A column has a blank name
    #[error("Relation '{relation}' declares a field with an empty name")]
    EmptyFieldName { relation: String },

    /// Same column declared twice
    #[error("Relation '{relation}' declares field '{field}' more than once")]
    DuplicateField { relation: String, field: String },

    /// Relation file could not be read
    #[error("Failed to read relation file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Relation file is not valid JSON for a relation
    #[error("Malformed relation file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RelationError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RelationError::EmptyName => "RSQL_RELATION_EMPTY_NAME",
            RelationError::EmptyFieldName { .. } => "RSQL_RELATION_EMPTY_FIELD_NAME",
            RelationError::DuplicateField { .. } => "RSQL_RELATION_DUPLICATE_FIELD",
            RelationError::Io { .. } => "RSQL_RELATION_IO",
            RelationError::Malformed { .. } => "RSQL_RELATION_MALFORMED",
        }
    }
}
