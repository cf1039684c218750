//! Field resolution shared by every strategy

use std::collections::BTreeMap;

use crate::relation::{RelationMeta, TypedField};

use super::errors::{CriteriaError, CriteriaResult};

/// Resolve `selector` to a typed column of `relation`
pub fn resolve_field<'r, R: RelationMeta + ?Sized>(
    relation: &'r R,
    selector: &str,
) -> CriteriaResult<&'r TypedField> {
    relation
        .lookup(selector)
        .ok_or_else(|| CriteriaError::unknown_field(relation.name(), selector))
}

/// A relation view that maps selector aliases to column names
///
/// Selectors without an alias are looked up unchanged.
pub struct AliasedRelation<'a, R: ?Sized> {
    inner: &'a R,
    aliases: &'a BTreeMap<String, String>,
}

impl<'a, R: RelationMeta + ?Sized> AliasedRelation<'a, R> {
    pub fn new(inner: &'a R, aliases: &'a BTreeMap<String, String>) -> Self {
        Self { inner, aliases }
    }
}

impl<R: RelationMeta + ?Sized> RelationMeta for AliasedRelation<'_, R> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn lookup(&self, selector: &str) -> Option<&TypedField> {
        let target = self
            .aliases
            .get(selector)
            .map(String::as_str)
            .unwrap_or(selector);
        self.inner.lookup(target)
    }
}
