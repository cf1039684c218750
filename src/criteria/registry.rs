//! Operator-symbol → strategy registry
//!
//! Built once, immutable afterwards, and safe to share across threads.
//! Dispatch looks up the node's operator symbol and delegates to the
//! registered strategy.

use std::collections::{BTreeMap, HashMap};

use crate::ast::{FilterNode, FilterTree};
use crate::condition::Condition;
use crate::config::{ConfigError, ConfigResult, TranslatorConfig};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::relation::RelationMeta;

use super::errors::{CriteriaError, CriteriaResult};
use super::field::AliasedRelation;
use super::strategy::PredicateStrategy;

/// Maps operator symbols to predicate strategies
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<String, PredicateStrategy>,
    selector_aliases: BTreeMap<String, String>,
}

impl StrategyRegistry {
    /// Registry with every built-in symbol and no aliases
    pub fn standard() -> Self {
        RegistryBuilder::new().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with the built-in symbols plus the aliases in `config`
    pub fn from_config(config: &TranslatorConfig) -> ConfigResult<Self> {
        let mut builder = RegistryBuilder::new();
        for (alias, target) in &config.operator_aliases {
            builder = builder.alias(alias, target)?;
        }
        for (alias, column) in &config.selector_aliases {
            builder = builder.selector_alias(alias, column);
        }
        Ok(builder.build())
    }

    /// Strategy registered for `symbol`
    pub fn resolve(&self, symbol: &str) -> CriteriaResult<PredicateStrategy> {
        self.strategies
            .get(symbol)
            .copied()
            .ok_or_else(|| CriteriaError::unsupported_operator(symbol))
    }

    /// Build the condition for a single comparison node
    pub fn dispatch<R: RelationMeta + ?Sized>(
        &self,
        relation: &R,
        node: &FilterNode,
    ) -> CriteriaResult<Condition> {
        let result = self.resolve(node.operator()).and_then(|strategy| {
            if self.selector_aliases.is_empty() {
                strategy.build(relation, node)
            } else {
                strategy.build(&AliasedRelation::new(relation, &self.selector_aliases), node)
            }
        });

        match &result {
            Ok(condition) => {
                if Logger::enabled(Severity::Trace) {
                    let rendered = condition.to_string();
                    log_event_with_fields(
                        Event::ConditionBuilt,
                        &[
                            ("condition", rendered.as_str()),
                            ("operator", node.operator()),
                            ("relation", relation.name()),
                            ("selector", node.selector()),
                        ],
                    );
                }
            }
            Err(err) => {
                let event = match err {
                    CriteriaError::UnsupportedOperator { .. } => Event::OperatorRejected,
                    _ => Event::TranslationFailed,
                };
                log_event_with_fields(
                    event,
                    &[
                        ("code", err.code()),
                        ("operator", node.operator()),
                        ("selector", node.selector()),
                    ],
                );
            }
        }

        result
    }

    /// Build the condition for a whole filter tree
    ///
    /// Fails with the first error found in a depth-first, left-to-right walk.
    pub fn translate<R: RelationMeta + ?Sized>(
        &self,
        relation: &R,
        tree: &FilterTree,
    ) -> CriteriaResult<Condition> {
        match tree {
            FilterTree::Comparison(node) => self.dispatch(relation, node),
            FilterTree::And { and } => Ok(collapse(Condition::And(
                self.translate_group(relation, and)?,
            ))),
            FilterTree::Or { or } => Ok(collapse(Condition::Or(
                self.translate_group(relation, or)?,
            ))),
        }
    }

    fn translate_group<R: RelationMeta + ?Sized>(
        &self,
        relation: &R,
        children: &[FilterTree],
    ) -> CriteriaResult<Vec<Condition>> {
        if children.is_empty() {
            return Err(CriteriaError::EmptyGroup);
        }
        children
            .iter()
            .map(|child| self.translate(relation, child))
            .collect()
    }

    /// Registered symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Registered symbols with their strategies, sorted by symbol
    pub fn entries(&self) -> Vec<(&str, PredicateStrategy)> {
        let mut entries: Vec<_> = self
            .strategies
            .iter()
            .map(|(symbol, strategy)| (symbol.as_str(), *strategy))
            .collect();
        entries.sort_unstable_by_key(|(symbol, _)| *symbol);
        entries
    }

    pub fn selector_aliases(&self) -> &BTreeMap<String, String> {
        &self.selector_aliases
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// A single-child group renders as the child itself
fn collapse(condition: Condition) -> Condition {
    match condition {
        Condition::And(mut children) | Condition::Or(mut children) if children.len() == 1 => {
            children.remove(0)
        }
        other => other,
    }
}

/// Builder for [`StrategyRegistry`]
#[derive(Debug)]
pub struct RegistryBuilder {
    strategies: HashMap<String, PredicateStrategy>,
    selector_aliases: BTreeMap<String, String>,
}

impl RegistryBuilder {
    /// Builder seeded with every built-in symbol
    pub fn new() -> Self {
        let strategies = PredicateStrategy::ALL
            .iter()
            .flat_map(|strategy| {
                strategy
                    .symbols()
                    .iter()
                    .map(move |symbol| (symbol.to_string(), *strategy))
            })
            .collect();

        Self {
            strategies,
            selector_aliases: BTreeMap::new(),
        }
    }

    /// Register `alias` as another symbol for the strategy behind `target`
    pub fn alias(mut self, alias: &str, target: &str) -> ConfigResult<Self> {
        if alias.trim().is_empty() || target.trim().is_empty() {
            return Err(ConfigError::EmptyAlias { kind: "Operator" });
        }
        if self.strategies.contains_key(alias) {
            return Err(ConfigError::ConflictingAlias {
                alias: alias.to_string(),
            });
        }
        let strategy = *self
            .strategies
            .get(target)
            .ok_or_else(|| ConfigError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            })?;

        self.strategies.insert(alias.to_string(), strategy);
        Ok(self)
    }

    /// Resolve selector `alias` to `column` before field lookup
    pub fn selector_alias(mut self, alias: &str, column: &str) -> Self {
        self.selector_aliases
            .insert(alias.to_string(), column.to_string());
        self
    }

    pub fn build(self) -> StrategyRegistry {
        if Logger::enabled(Event::RegistryBuilt.severity()) {
            let symbols = self.strategies.len().to_string();
            let selector_aliases = self.selector_aliases.len().to_string();
            log_event_with_fields(
                Event::RegistryBuilt,
                &[
                    ("selector_aliases", selector_aliases.as_str()),
                    ("symbols", symbols.as_str()),
                ],
            );
        }

        StrategyRegistry {
            strategies: self.strategies,
            selector_aliases: self.selector_aliases,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
