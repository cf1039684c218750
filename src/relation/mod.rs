//! Relation metadata
//!
//! The criteria builders resolve selectors through [`RelationMeta`] only.
//! [`Relation`] is the in-crate implementation used by the CLI and tests;
//! callers may implement the trait over their own catalog.

mod errors;
mod loader;
mod types;

pub use errors::{RelationError, RelationResult};
pub use loader::RelationLoader;
pub use types::{FieldType, Relation, RelationBuilder, RelationMeta, TypedField};
