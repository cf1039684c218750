//! aerorsql - translate filter-query trees into SQL conditions
//!
//! A parsed filter node (`selector`, operator symbol, raw operands) is
//! resolved against relation metadata, its operands are coerced to the
//! column type, and a typed boolean [`condition::Condition`] is built.

pub mod ast;
pub mod cli;
pub mod coerce;
pub mod condition;
pub mod config;
pub mod criteria;
pub mod observability;
pub mod relation;
