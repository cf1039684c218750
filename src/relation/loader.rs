//! Relation loader for reading relation metadata from disk
//!
//! A relation file is one JSON object:
//!
//! ```json
//! {"name": "ALL_DATA_TYPE", "fields": [{"name": "ID", "type": "integer"}]}
//! ```

use std::fs;
use std::path::Path;

use crate::observability::{log_event_with_fields, Event};

use super::errors::{RelationError, RelationResult};
use super::types::Relation;

/// Reads relation definitions from JSON
pub struct RelationLoader;

impl RelationLoader {
    /// Loads and validates a relation file
    pub fn load_file(path: &Path) -> RelationResult<Relation> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| RelationError::Io {
            path: display.clone(),
            source,
        })?;

        let relation = Self::from_json_str(&content).map_err(|e| match e {
            RelationError::Malformed { source, .. } => RelationError::Malformed {
                path: display.clone(),
                source,
            },
            other => other,
        })?;

        let field_count = relation.fields.len().to_string();
        log_event_with_fields(
            Event::RelationLoaded,
            &[
                ("fields", field_count.as_str()),
                ("path", display.as_str()),
                ("relation", relation.name.as_str()),
            ],
        );

        Ok(relation)
    }

    /// Parses and validates a relation from a JSON string
    pub fn from_json_str(content: &str) -> RelationResult<Relation> {
        let relation: Relation =
            serde_json::from_str(content).map_err(|source| RelationError::Malformed {
                path: "<inline>".to_string(),
                source,
            })?;
        relation.validate_structure()?;
        Ok(relation)
    }
}
