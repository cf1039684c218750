//! Criteria builders
//!
//! Turns [`FilterNode`](crate::ast::FilterNode)s into
//! [`Condition`](crate::condition::Condition)s:
//!
//! 1. The [`StrategyRegistry`] maps the node's operator symbol to a
//!    [`PredicateStrategy`], or fails with `RSQL_UNSUPPORTED_OPERATOR`.
//! 2. The strategy resolves the selector against the relation, checks the
//!    operand count and coerces each operand to the column type.
//! 3. The strategy emits the condition.
//!
//! The registry is immutable after `build()` and may be shared freely.

mod errors;
mod field;
mod registry;
mod strategy;

pub use errors::{CriteriaError, CriteriaResult};
pub use field::{resolve_field, AliasedRelation};
pub use registry::{RegistryBuilder, StrategyRegistry};
pub use strategy::{Arity, PredicateStrategy};
