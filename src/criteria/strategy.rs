//! Predicate construction strategies
//!
//! One variant per operator family. A strategy resolves the node's field,
//! checks the operand count, coerces operands to the field type and emits a
//! [`Condition`]. Strategies are stateless; `build` is a pure function of
//! its inputs.

use std::fmt;

use crate::ast::FilterNode;
use crate::coerce::{coerce, coerce_all};
use crate::condition::{CompareOp, Condition, FieldRef, TypedValue};
use crate::relation::{RelationMeta, TypedField};

use super::errors::{CriteriaError, CriteriaResult};
use super::field::resolve_field;

/// Number of operands a strategy accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Predicate construction strategy, one per operator family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PredicateStrategy {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    Between,
    Exists,
    NonExists,
    Nullable,
    Like,
    NotLike,
}

impl PredicateStrategy {
    /// Every strategy, in registration order
    pub const ALL: [PredicateStrategy; 14] = [
        PredicateStrategy::Equal,
        PredicateStrategy::NotEqual,
        PredicateStrategy::GreaterThan,
        PredicateStrategy::GreaterThanOrEqual,
        PredicateStrategy::LessThan,
        PredicateStrategy::LessThanOrEqual,
        PredicateStrategy::In,
        PredicateStrategy::NotIn,
        PredicateStrategy::Between,
        PredicateStrategy::Exists,
        PredicateStrategy::NonExists,
        PredicateStrategy::Nullable,
        PredicateStrategy::Like,
        PredicateStrategy::NotLike,
    ];

    /// Strategy name for listings and logs
    pub fn name(&self) -> &'static str {
        match self {
            PredicateStrategy::Equal => "equal",
            PredicateStrategy::NotEqual => "not_equal",
            PredicateStrategy::GreaterThan => "greater_than",
            PredicateStrategy::GreaterThanOrEqual => "greater_than_or_equal",
            PredicateStrategy::LessThan => "less_than",
            PredicateStrategy::LessThanOrEqual => "less_than_or_equal",
            PredicateStrategy::In => "in",
            PredicateStrategy::NotIn => "not_in",
            PredicateStrategy::Between => "between",
            PredicateStrategy::Exists => "exists",
            PredicateStrategy::NonExists => "non_exists",
            PredicateStrategy::Nullable => "nullable",
            PredicateStrategy::Like => "like",
            PredicateStrategy::NotLike => "not_like",
        }
    }

    /// Operator tokens shared with the filter parser
    pub fn symbols(&self) -> &'static [&'static str] {
        match self {
            PredicateStrategy::Equal => &["=="],
            PredicateStrategy::NotEqual => &["!="],
            PredicateStrategy::GreaterThan => &["=gt=", ">"],
            PredicateStrategy::GreaterThanOrEqual => &["=ge=", ">="],
            PredicateStrategy::LessThan => &["=lt=", "<"],
            PredicateStrategy::LessThanOrEqual => &["=le=", "<="],
            PredicateStrategy::In => &["=in="],
            PredicateStrategy::NotIn => &["=out="],
            PredicateStrategy::Between => &["=bt="],
            PredicateStrategy::Exists => &["=ex="],
            PredicateStrategy::NonExists => &["=nex="],
            PredicateStrategy::Nullable => &["=nu="],
            PredicateStrategy::Like => &["=lk="],
            PredicateStrategy::NotLike => &["=nlk="],
        }
    }

    /// Operand count this strategy accepts
    pub fn arity(&self) -> Arity {
        match self {
            PredicateStrategy::In | PredicateStrategy::NotIn => Arity::AtLeast(1),
            PredicateStrategy::Between => Arity::Exactly(2),
            _ => Arity::Exactly(1),
        }
    }

    /// Build the condition for `node` against `relation`
    pub fn build<R: RelationMeta + ?Sized>(
        &self,
        relation: &R,
        node: &FilterNode,
    ) -> CriteriaResult<Condition> {
        let field = resolve_field(relation, node.selector())?;
        let args = node.arguments();

        let arity = self.arity();
        if !arity.accepts(args.len()) {
            return Err(CriteriaError::invalid_operand(
                node.selector(),
                format!(
                    "operator '{}' takes {} operand(s), got {}",
                    node.operator(),
                    arity,
                    args.len()
                ),
            ));
        }

        let column = FieldRef::new(relation.name(), field.name.as_str());

        let condition = match self {
            PredicateStrategy::Equal => compare(column, CompareOp::Eq, field, node)?,
            PredicateStrategy::NotEqual => compare(column, CompareOp::Ne, field, node)?,
            PredicateStrategy::GreaterThan => compare(column, CompareOp::Gt, field, node)?,
            PredicateStrategy::GreaterThanOrEqual => compare(column, CompareOp::Ge, field, node)?,
            PredicateStrategy::LessThan => compare(column, CompareOp::Lt, field, node)?,
            PredicateStrategy::LessThanOrEqual => compare(column, CompareOp::Le, field, node)?,
            PredicateStrategy::In | PredicateStrategy::NotIn => Condition::InList {
                field: column,
                values: coerce_all(field.field_type, args)
                    .map_err(|e| CriteriaError::coercion(node.selector(), e))?,
                negated: *self == PredicateStrategy::NotIn,
            },
            PredicateStrategy::Between => Condition::Between {
                field: column,
                lower: coerce_single(field, node, &args[0])?,
                upper: coerce_single(field, node, &args[1])?,
            },
            // Operand present but its content is ignored
            PredicateStrategy::Exists => Condition::is_not_null(column),
            PredicateStrategy::NonExists => Condition::is_null(column),
            PredicateStrategy::Nullable => {
                let value = coerce_single(field, node, &args[0])?;
                Condition::is_null(column.clone())
                    .or(Condition::compare(column, CompareOp::Eq, value))
            }
            PredicateStrategy::Like | PredicateStrategy::NotLike => Condition::Like {
                field: column,
                pattern: args[0].clone(),
                negated: *self == PredicateStrategy::NotLike,
            },
        };

        Ok(condition)
    }
}

impl fmt::Display for PredicateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn compare(
    column: FieldRef,
    op: CompareOp,
    field: &TypedField,
    node: &FilterNode,
) -> CriteriaResult<Condition> {
    let value = coerce_single(field, node, &node.arguments()[0])?;
    Ok(Condition::compare(column, op, value))
}

fn coerce_single(field: &TypedField, node: &FilterNode, raw: &str) -> CriteriaResult<TypedValue> {
    coerce(field.field_type, raw).map_err(|e| CriteriaError::coercion(node.selector(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{FieldType, Relation};

    fn relation() -> Relation {
        Relation::builder("T")
            .field("N", FieldType::Integer)
            .field("S", FieldType::Text)
            .field("TS", FieldType::Timestamp)
            .build()
            .unwrap()
    }

    #[test]
    fn test_arity_table() {
        assert_eq!(PredicateStrategy::Equal.arity(), Arity::Exactly(1));
        assert_eq!(PredicateStrategy::In.arity(), Arity::AtLeast(1));
        assert_eq!(PredicateStrategy::Between.arity(), Arity::Exactly(2));
        assert_eq!(PredicateStrategy::Exists.arity(), Arity::Exactly(1));
        assert!(Arity::AtLeast(1).accepts(3));
        assert!(!Arity::AtLeast(1).accepts(0));
    }

    #[test]
    fn test_symbols_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for strategy in PredicateStrategy::ALL {
            for symbol in strategy.symbols() {
                assert!(seen.insert(*symbol), "duplicate symbol {}", symbol);
            }
        }
        assert_eq!(seen.len(), 18);
    }

    #[test]
    fn test_comparison_rejects_extra_operand() {
        let node = FilterNode::new("==", "N", ["1", "2"]);
        let err = PredicateStrategy::Equal.build(&relation(), &node).unwrap_err();
        assert_eq!(err.code(), "RSQL_INVALID_OPERAND");
        assert!(err.to_string().contains("exactly 1"));
    }

    #[test]
    fn test_in_rejects_empty_list() {
        let node = FilterNode::new("=in=", "N", Vec::<String>::new());
        let err = PredicateStrategy::In.build(&relation(), &node).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_in_stops_at_bad_operand() {
        let node = FilterNode::new("=in=", "N", ["1", "two", "3"]);
        let err = PredicateStrategy::In.build(&relation(), &node).unwrap_err();
        assert!(err.to_string().contains("'two'"));
    }

    #[test]
    fn test_unknown_field_before_arity() {
        let node = FilterNode::new("=bt=", "MISSING", ["1"]);
        let err = PredicateStrategy::Between.build(&relation(), &node).unwrap_err();
        assert_eq!(err.code(), "RSQL_UNKNOWN_FIELD");
    }

    #[test]
    fn test_between_keeps_inverted_bounds() {
        let node = FilterNode::new("=bt=", "N", ["9", "1"]);
        let cond = PredicateStrategy::Between.build(&relation(), &node).unwrap();
        assert_eq!(cond.to_string(), "\"T\".\"N\" between 9 and 1");
    }

    #[test]
    fn test_exists_ignores_operand_content() {
        let node = FilterNode::single("=ex=", "TS", "not-a-timestamp");
        let cond = PredicateStrategy::Exists.build(&relation(), &node).unwrap();
        assert_eq!(cond, Condition::is_not_null(FieldRef::new("T", "TS")));
    }

    #[test]
    fn test_non_exists_requires_operand() {
        let node = FilterNode::new("=nex=", "TS", Vec::<String>::new());
        assert!(PredicateStrategy::NonExists.build(&relation(), &node).is_err());
    }

    #[test]
    fn test_like_on_non_text_column_skips_coercion() {
        let node = FilterNode::single("=lk=", "N", "12%");
        let cond = PredicateStrategy::Like.build(&relation(), &node).unwrap();
        assert_eq!(cond.to_string(), "\"T\".\"N\" like '12%'");
    }

    #[test]
    fn test_nullable_coerces_operand() {
        let node = FilterNode::single("=nu=", "N", "x");
        let err = PredicateStrategy::Nullable.build(&relation(), &node).unwrap_err();
        assert_eq!(err.code(), "RSQL_INVALID_OPERAND");

        let node = FilterNode::single("=nu=", "N", "4");
        let cond = PredicateStrategy::Nullable.build(&relation(), &node).unwrap();
        assert_eq!(cond.to_string(), "(\"T\".\"N\" is null or \"T\".\"N\" = 4)");
    }
}
