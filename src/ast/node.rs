//! Filter AST structures
//!
//! Defines the parsed filter representation handed over by the upstream
//! parser. Nodes are immutable once built.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single comparison node: `selector <operator> arguments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterNode {
    /// Operator symbol, e.g. `==` or `=in=`
    operator: String,
    /// Field selector within the target relation
    selector: String,
    /// Raw operand strings in source order
    #[serde(default)]
    arguments: Vec<String>,
}

impl FilterNode {
    /// Create a new node
    pub fn new<I, S>(operator: impl Into<String>, selector: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operator: operator.into(),
            selector: selector.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a node with a single operand
    pub fn single(
        operator: impl Into<String>,
        selector: impl Into<String>,
        argument: impl Into<String>,
    ) -> Self {
        Self::new(operator, selector, [argument.into()])
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.selector, self.operator)?;
        match self.arguments.as_slice() {
            [single] => write!(f, "{}", quote(single)),
            many => {
                let quoted: Vec<String> = many.iter().map(|a| quote(a)).collect();
                write!(f, "({})", quoted.join(","))
            }
        }
    }
}

/// Single-quote an operand, doubling embedded quotes
fn quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

/// A logical tree of comparison nodes
///
/// Deserializes from either a bare node object or `{"and": [...]}` /
/// `{"or": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterTree {
    /// Every child must hold
    And { and: Vec<FilterTree> },
    /// At least one child must hold
    Or { or: Vec<FilterTree> },
    /// Leaf comparison
    Comparison(FilterNode),
}

impl FilterTree {
    /// Wrap a comparison node
    pub fn node(node: FilterNode) -> Self {
        FilterTree::Comparison(node)
    }

    /// Conjunction of children
    pub fn all(children: Vec<FilterTree>) -> Self {
        FilterTree::And { and: children }
    }

    /// Disjunction of children
    pub fn any(children: Vec<FilterTree>) -> Self {
        FilterTree::Or { or: children }
    }

    /// Number of comparison leaves in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            FilterTree::Comparison(_) => 1,
            FilterTree::And { and: children } | FilterTree::Or { or: children } => {
                children.iter().map(FilterTree::leaf_count).sum()
            }
        }
    }
}

impl From<FilterNode> for FilterTree {
    fn from(node: FilterNode) -> Self {
        FilterTree::Comparison(node)
    }
}
