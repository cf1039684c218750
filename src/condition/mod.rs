//! Boolean conditions produced by the criteria builders
//!
//! A [`Condition`] is an opaque predicate handed to a downstream SQL layer.
//! Nothing here executes or dialect-renders it; `Display` gives the
//! canonical inline form used in logs, CLI output and tests:
//!
//! ```text
//! "ALL_DATA_TYPE"."ID" in (5, 7, 10)
//! ("ALL_DATA_TYPE"."F_VALUE_JSON" is null or "ALL_DATA_TYPE"."F_VALUE_JSON" = 't')
//! ```

mod value;

pub use value::TypedValue;

use std::fmt;

use value::write_quoted;

/// A column qualified by its relation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    relation: String,
    column: String,
}

impl FieldRef {
    pub fn new(relation: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            column: column.into(),
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

fn write_identifier(f: &mut fmt::Formatter<'_>, ident: &str) -> fmt::Result {
    write!(f, "\"{}\"", ident.replace('"', "\"\""))
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_identifier(f, &self.relation)?;
        f.write_str(".")?;
        write_identifier(f, &self.column)
    }
}

/// Binary comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    /// SQL operator text
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }
}

/// A composable boolean predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field <op> value`
    Compare {
        field: FieldRef,
        op: CompareOp,
        value: TypedValue,
    },
    /// `field [not] in (v1, v2, ...)`, values in operand order
    InList {
        field: FieldRef,
        values: Vec<TypedValue>,
        negated: bool,
    },
    /// `field between lower and upper`, bounds never reordered
    Between {
        field: FieldRef,
        lower: TypedValue,
        upper: TypedValue,
    },
    /// `field is [not] null`
    IsNull { field: FieldRef, negated: bool },
    /// `field [not] like 'pattern'`, pattern kept verbatim
    Like {
        field: FieldRef,
        pattern: String,
        negated: bool,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn compare(field: FieldRef, op: CompareOp, value: TypedValue) -> Self {
        Condition::Compare { field, op, value }
    }

    pub fn is_null(field: FieldRef) -> Self {
        Condition::IsNull {
            field,
            negated: false,
        }
    }

    pub fn is_not_null(field: FieldRef) -> Self {
        Condition::IsNull {
            field,
            negated: true,
        }
    }

    /// Conjunction, flattening nested `And` on the left
    pub fn and(self, other: Condition) -> Self {
        match self {
            Condition::And(mut children) => {
                children.push(other);
                Condition::And(children)
            }
            first => Condition::And(vec![first, other]),
        }
    }

    /// Disjunction, flattening nested `Or` on the left
    pub fn or(self, other: Condition) -> Self {
        match self {
            Condition::Or(mut children) => {
                children.push(other);
                Condition::Or(children)
            }
            first => Condition::Or(vec![first, other]),
        }
    }

    /// Negation
    pub fn negate(self) -> Self {
        Condition::Not(Box::new(self))
    }

    /// Number of leaf predicates
    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::And(children) | Condition::Or(children) => {
                children.iter().map(Condition::leaf_count).sum()
            }
            Condition::Not(inner) => inner.leaf_count(),
            _ => 1,
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, children: &[Condition], joiner: &str) -> fmt::Result {
    f.write_str("(")?;
    for (idx, child) in children.iter().enumerate() {
        if idx > 0 {
            write!(f, " {} ", joiner)?;
        }
        write!(f, "{}", child)?;
    }
    f.write_str(")")
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare { field, op, value } => {
                write!(f, "{} {} {}", field, op.symbol(), value)
            }
            Condition::InList {
                field,
                values,
                negated,
            } => {
                let list: Vec<String> = values.iter().map(ToString::to_string).collect();
                let keyword = if *negated { "not in" } else { "in" };
                write!(f, "{} {} ({})", field, keyword, list.join(", "))
            }
            Condition::Between {
                field,
                lower,
                upper,
            } => write!(f, "{} between {} and {}", field, lower, upper),
            Condition::IsNull { field, negated } => {
                let keyword = if *negated { "is not null" } else { "is null" };
                write!(f, "{} {}", field, keyword)
            }
            Condition::Like {
                field,
                pattern,
                negated,
            } => {
                let keyword = if *negated { "not like" } else { "like" };
                write!(f, "{} {} ", field, keyword)?;
                write_quoted(f, pattern)
            }
            Condition::And(children) => write_group(f, children, "and"),
            Condition::Or(children) => write_group(f, children, "or"),
            Condition::Not(inner) => write!(f, "not ({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(column: &str) -> FieldRef {
        FieldRef::new("T", column)
    }

    #[test]
    fn test_field_ref_quoting() {
        assert_eq!(field("ID").to_string(), "\"T\".\"ID\"");
        assert_eq!(FieldRef::new("T", "a\"b").to_string(), "\"T\".\"a\"\"b\"");
    }

    #[test]
    fn test_compare_render() {
        let cond = Condition::compare(field("ID"), CompareOp::Ne, TypedValue::Integer(3));
        assert_eq!(cond.to_string(), "\"T\".\"ID\" <> 3");
    }

    #[test]
    fn test_in_list_render() {
        let cond = Condition::InList {
            field: field("ID"),
            values: vec![TypedValue::Integer(5), TypedValue::Integer(7)],
            negated: true,
        };
        assert_eq!(cond.to_string(), "\"T\".\"ID\" not in (5, 7)");
    }

    #[test]
    fn test_like_pattern_verbatim() {
        let cond = Condition::Like {
            field: field("S"),
            pattern: "a_b%'".into(),
            negated: false,
        };
        assert_eq!(cond.to_string(), "\"T\".\"S\" like 'a_b%'''");
    }

    #[test]
    fn test_composition_flattens() {
        let a = Condition::is_null(field("A"));
        let b = Condition::is_not_null(field("B"));
        let c = Condition::compare(field("C"), CompareOp::Gt, TypedValue::Integer(1));

        let all = a.clone().and(b.clone()).and(c.clone());
        assert_eq!(all.leaf_count(), 3);
        assert_eq!(
            all.to_string(),
            "(\"T\".\"A\" is null and \"T\".\"B\" is not null and \"T\".\"C\" > 1)"
        );

        let any = a.or(b).negate();
        assert_eq!(
            any.to_string(),
            "not ((\"T\".\"A\" is null or \"T\".\"B\" is not null))"
        );
    }
}
