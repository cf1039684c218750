//! Relation metadata types
//!
//! Supported column types:
//! - text: UTF-8 string
//! - integer: 64-bit signed integer
//! - real: 64-bit floating point
//! - decimal: exact decimal
//! - boolean
//! - timestamp / date: ISO-8601 local date-time / date
//! - duration / period: ISO-8601 time-based / date-based amounts
//! - json: JSON document stored as text

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{RelationError, RelationResult};

/// Declared semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Integer,
    Real,
    Decimal,
    Boolean,
    Timestamp,
    Date,
    Duration,
    Period,
    Json,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Real => "real",
            FieldType::Decimal => "decimal",
            FieldType::Boolean => "boolean",
            FieldType::Timestamp => "timestamp",
            FieldType::Date => "date",
            FieldType::Duration => "duration",
            FieldType::Period => "period",
            FieldType::Json => "json",
        }
    }

    /// Returns true for types whose literals are numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Real | FieldType::Decimal)
    }

    /// Returns true for date and time based types
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            FieldType::Timestamp | FieldType::Date | FieldType::Duration | FieldType::Period
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A column of a relation together with its declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedField {
    /// Column name, unique within the relation
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl TypedField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Field metadata lookup for a named relation
///
/// This is the only view of schema metadata the criteria builders use.
pub trait RelationMeta {
    /// Relation (table) name
    fn name(&self) -> &str;

    /// Resolve a selector to a column, `None` when unknown
    fn lookup(&self, selector: &str) -> Option<&TypedField>;
}

impl<T: RelationMeta + ?Sized> RelationMeta for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup(&self, selector: &str) -> Option<&TypedField> {
        (**self).lookup(selector)
    }
}

/// A named relation with an ordered list of typed columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Relation name
    pub name: String,
    /// Columns in declaration order
    pub fields: Vec<TypedField>,
}

impl Relation {
    /// Create a relation, rejecting duplicate column names
    pub fn new(name: impl Into<String>, fields: Vec<TypedField>) -> RelationResult<Self> {
        let relation = Self {
            name: name.into(),
            fields,
        };
        relation.validate_structure()?;
        Ok(relation)
    }

    /// Start a relation with no columns
    pub fn builder(name: impl Into<String>) -> RelationBuilder {
        RelationBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Validates the relation definition itself
    pub fn validate_structure(&self) -> RelationResult<()> {
        if self.name.trim().is_empty() {
            return Err(RelationError::EmptyName);
        }

        for (idx, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(RelationError::EmptyFieldName {
                    relation: self.name.clone(),
                });
            }
            if self.fields[..idx].iter().any(|f| f.name == field.name) {
                return Err(RelationError::DuplicateField {
                    relation: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(())
    }
}

impl RelationMeta for Relation {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, selector: &str) -> Option<&TypedField> {
        let column = selector
            .strip_prefix(self.name.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .filter(|_| !self.fields.iter().any(|f| f.name == selector))
            .unwrap_or(selector);

        self.fields.iter().find(|f| f.name == column)
    }
}

/// Incremental construction of a [`Relation`]
#[derive(Debug, Clone)]
pub struct RelationBuilder {
    name: String,
    fields: Vec<TypedField>,
}

impl RelationBuilder {
    /// Append a column
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(TypedField::new(name, field_type));
        self
    }

    /// Finish, validating the column list
    pub fn build(self) -> RelationResult<Relation> {
        Relation::new(self.name, self.fields)
    }
}
