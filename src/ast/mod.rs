//! Filter AST consumed by the criteria builders
//!
//! The upstream parser produces these values; nothing in this crate parses
//! filter text.

mod node;

pub use node::{FilterNode, FilterTree};
