//! Criteria Builder Tests
//!
//! One test per operator family against a relation covering every column
//! type:
//! - Registry resolves the symbol to the expected strategy
//! - Operands are coerced to the column type
//! - Canonical text of the built condition

use aerorsql::ast::FilterNode;
use aerorsql::criteria::{PredicateStrategy, StrategyRegistry};
use aerorsql::relation::{FieldType, Relation};

// =============================================================================
// Helper Functions
// =============================================================================

fn all_data_type() -> Relation {
    Relation::builder("ALL_DATA_TYPE")
        .field("ID", FieldType::Integer)
        .field("F_STR", FieldType::Text)
        .field("F_INT", FieldType::Integer)
        .field("F_REAL", FieldType::Real)
        .field("F_DOUBLE", FieldType::Real)
        .field("F_DECIMAL", FieldType::Decimal)
        .field("F_BOOL", FieldType::Boolean)
        .field("F_DATE", FieldType::Timestamp)
        .field("F_DAY", FieldType::Date)
        .field("F_DURATION", FieldType::Duration)
        .field("F_PERIOD", FieldType::Period)
        .field("F_VALUE_JSON", FieldType::Json)
        .build()
        .unwrap()
}

/// Resolve, check the strategy, build and render.
fn build(node: &FilterNode, expected: PredicateStrategy) -> String {
    let registry = StrategyRegistry::standard();
    assert_eq!(registry.resolve(node.operator()).unwrap(), expected);
    registry
        .dispatch(&all_data_type(), node)
        .unwrap()
        .to_string()
}

// =============================================================================
// Comparison Tests
// =============================================================================

#[test]
fn test_equal_node() {
    let node = FilterNode::single("==", "F_PERIOD", "P1Y2M3D");
    assert_eq!(
        build(&node, PredicateStrategy::Equal),
        "\"ALL_DATA_TYPE\".\"F_PERIOD\" = 'P1Y2M3D'"
    );
}

#[test]
fn test_not_equal_node() {
    let node = FilterNode::single("!=", "F_STR", "abc");
    assert_eq!(
        build(&node, PredicateStrategy::NotEqual),
        "\"ALL_DATA_TYPE\".\"F_STR\" <> 'abc'"
    );
}

#[test]
fn test_greater_than_node() {
    let node = FilterNode::single("=gt=", "F_REAL", "5.5");
    assert_eq!(
        build(&node, PredicateStrategy::GreaterThan),
        "\"ALL_DATA_TYPE\".\"F_REAL\" > 5.5"
    );
}

#[test]
fn test_greater_than_or_equal_node() {
    let node = FilterNode::single("=ge=", "F_INT", "5");
    assert_eq!(
        build(&node, PredicateStrategy::GreaterThanOrEqual),
        "\"ALL_DATA_TYPE\".\"F_INT\" >= 5"
    );
}

#[test]
fn test_less_than_node() {
    let node = FilterNode::single("=lt=", "F_DOUBLE", "23.54326");
    assert_eq!(
        build(&node, PredicateStrategy::LessThan),
        "\"ALL_DATA_TYPE\".\"F_DOUBLE\" < 23.54326"
    );
}

#[test]
fn test_less_than_or_equal_node() {
    let node = FilterNode::single("=le=", "F_DECIMAL", "55.24681579");
    assert_eq!(
        build(&node, PredicateStrategy::LessThanOrEqual),
        "\"ALL_DATA_TYPE\".\"F_DECIMAL\" <= 55.24681579"
    );
}

#[test]
fn test_symbolic_aliases_match_textual_symbols() {
    let registry = StrategyRegistry::standard();
    let relation = all_data_type();
    for (textual, symbolic) in [("=gt=", ">"), ("=ge=", ">="), ("=lt=", "<"), ("=le=", "<=")] {
        let a = registry
            .dispatch(&relation, &FilterNode::single(textual, "F_INT", "5"))
            .unwrap();
        let b = registry
            .dispatch(&relation, &FilterNode::single(symbolic, "F_INT", "5"))
            .unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_boolean_and_date_columns() {
    let node = FilterNode::single("==", "F_BOOL", "yes");
    assert_eq!(
        build(&node, PredicateStrategy::Equal),
        "\"ALL_DATA_TYPE\".\"F_BOOL\" = true"
    );

    let node = FilterNode::single("=ge=", "F_DAY", "2020-04-05");
    assert_eq!(
        build(&node, PredicateStrategy::GreaterThanOrEqual),
        "\"ALL_DATA_TYPE\".\"F_DAY\" >= date '2020-04-05'"
    );
}

// =============================================================================
// Membership and Range Tests
// =============================================================================

#[test]
fn test_in_node() {
    let node = FilterNode::new("=in=", "ID", ["5", "7", "10"]);
    assert_eq!(
        build(&node, PredicateStrategy::In),
        "\"ALL_DATA_TYPE\".\"ID\" in (5, 7, 10)"
    );
}

#[test]
fn test_not_in_node() {
    let node = FilterNode::new("=out=", "ID", ["5", "7", "10"]);
    assert_eq!(
        build(&node, PredicateStrategy::NotIn),
        "\"ALL_DATA_TYPE\".\"ID\" not in (5, 7, 10)"
    );
}

#[test]
fn test_between_node() {
    let node = FilterNode::new("=bt=", "F_DATE", ["2020-04-05T08:00:00", "2020-04-08T08:00:00"]);
    assert_eq!(
        build(&node, PredicateStrategy::Between),
        "\"ALL_DATA_TYPE\".\"F_DATE\" between timestamp '2020-04-05 08:00:00.0' \
         and timestamp '2020-04-08 08:00:00.0'"
    );
}

// =============================================================================
// Null Check Tests
// =============================================================================

#[test]
fn test_exists_node() {
    let node = FilterNode::single("=ex=", "F_PERIOD", "t");
    assert_eq!(
        build(&node, PredicateStrategy::Exists),
        "\"ALL_DATA_TYPE\".\"F_PERIOD\" is not null"
    );
}

#[test]
fn test_non_exists_node() {
    let node = FilterNode::single("=nex=", "F_DURATION", "t");
    assert_eq!(
        build(&node, PredicateStrategy::NonExists),
        "\"ALL_DATA_TYPE\".\"F_DURATION\" is null"
    );
}

#[test]
fn test_nullable_node() {
    let node = FilterNode::single("=nu=", "F_VALUE_JSON", "t");
    assert_eq!(
        build(&node, PredicateStrategy::Nullable),
        "(\"ALL_DATA_TYPE\".\"F_VALUE_JSON\" is null or \"ALL_DATA_TYPE\".\"F_VALUE_JSON\" = 't')"
    );
}

#[test]
fn test_nullable_duration_renders_iso() {
    let node = FilterNode::single("=nu=", "F_DURATION", "PT1H30M");
    assert_eq!(
        build(&node, PredicateStrategy::Nullable),
        "(\"ALL_DATA_TYPE\".\"F_DURATION\" is null or \"ALL_DATA_TYPE\".\"F_DURATION\" = 'PT1H30M')"
    );
}

// =============================================================================
// Pattern Tests
// =============================================================================

#[test]
fn test_like_node() {
    let node = FilterNode::single("=lk=", "F_STR", "test");
    assert_eq!(
        build(&node, PredicateStrategy::Like),
        "\"ALL_DATA_TYPE\".\"F_STR\" like 'test'"
    );
}

#[test]
fn test_not_like_node() {
    let node = FilterNode::single("=nlk=", "F_STR", "test%");
    assert_eq!(
        build(&node, PredicateStrategy::NotLike),
        "\"ALL_DATA_TYPE\".\"F_STR\" not like 'test%'"
    );
}

#[test]
fn test_like_pattern_quotes_escaped() {
    let node = FilterNode::single("=lk=", "F_STR", "O'Br%");
    assert_eq!(
        build(&node, PredicateStrategy::Like),
        "\"ALL_DATA_TYPE\".\"F_STR\" like 'O''Br%'"
    );
}
