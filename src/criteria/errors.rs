//! Criteria builder errors
//!
//! Error codes:
//! - RSQL_UNSUPPORTED_OPERATOR: no strategy registered for the symbol
//! - RSQL_UNKNOWN_FIELD: selector does not resolve against the relation
//! - RSQL_INVALID_OPERAND: wrong operand count, or operand fails coercion
//! - RSQL_EMPTY_GROUP: logical group without children
//!
//! All are caller-input errors. None is retried or recovered internally.

use thiserror::Error;

use crate::coerce::CoercionError;

/// Result type for criteria building
pub type CriteriaResult<T> = Result<T, CriteriaError>;

/// Criteria building errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    /// Operator symbol has no registered strategy
    #[error("Unsupported operator '{symbol}'")]
    UnsupportedOperator { symbol: String },

    /// Selector is not a column of the relation
    #[error("Unknown field '{selector}' in relation '{relation}'")]
    UnknownField { relation: String, selector: String },

    /// Operand count or content is invalid for the field
    #[error("Invalid operand for '{selector}': {reason}")]
    InvalidOperand { selector: String, reason: String },

    /// `and` / `or` group with nothing inside
    #[error("Logical group must contain at least one condition")]
    EmptyGroup,
}

impl CriteriaError {
    pub fn unsupported_operator(symbol: impl Into<String>) -> Self {
        CriteriaError::UnsupportedOperator {
            symbol: symbol.into(),
        }
    }

    pub fn unknown_field(relation: impl Into<String>, selector: impl Into<String>) -> Self {
        CriteriaError::UnknownField {
            relation: relation.into(),
            selector: selector.into(),
        }
    }

    pub fn invalid_operand(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        CriteriaError::InvalidOperand {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a coercion failure for `selector`
    pub fn coercion(selector: impl Into<String>, err: CoercionError) -> Self {
        Self::invalid_operand(selector, err.to_string())
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CriteriaError::UnsupportedOperator { .. } => "RSQL_UNSUPPORTED_OPERATOR",
            CriteriaError::UnknownField { .. } => "RSQL_UNKNOWN_FIELD",
            CriteriaError::InvalidOperand { .. } => "RSQL_INVALID_OPERAND",
            CriteriaError::EmptyGroup => "RSQL_EMPTY_GROUP",
        }
    }

    /// Returns the selector involved, if any
    pub fn selector(&self) -> Option<&str> {
        match self {
            CriteriaError::UnknownField { selector, .. }
            | CriteriaError::InvalidOperand { selector, .. } => Some(selector),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::FieldType;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CriteriaError::unsupported_operator("=zz=").code(),
            "RSQL_UNSUPPORTED_OPERATOR"
        );
        assert_eq!(
            CriteriaError::unknown_field("T", "X").code(),
            "RSQL_UNKNOWN_FIELD"
        );
        assert_eq!(
            CriteriaError::invalid_operand("X", "bad").code(),
            "RSQL_INVALID_OPERAND"
        );
        assert_eq!(CriteriaError::EmptyGroup.code(), "RSQL_EMPTY_GROUP");
    }

    #[test]
    fn test_error_display() {
        let err = CriteriaError::unknown_field("ALL_DATA_TYPE", "F_MISSING");
        let display = err.to_string();
        assert!(display.contains("F_MISSING"));
        assert!(display.contains("ALL_DATA_TYPE"));
        assert_eq!(err.selector(), Some("F_MISSING"));
    }

    #[test]
    fn test_coercion_wrapped_as_invalid_operand() {
        let cause = CoercionError {
            expected: FieldType::Integer,
            raw: "x".into(),
            reason: "invalid digit".into(),
        };
        let err = CriteriaError::coercion("ID", cause);
        assert_eq!(err.code(), "RSQL_INVALID_OPERAND");
        assert!(err.to_string().contains("'x' is not a valid integer literal"));
    }
}
