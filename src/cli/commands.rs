//! CLI command implementations
//!
//! Each command loads its inputs, does one piece of work and writes a
//! single JSON response. Input and config failures are fatal; a filter
//! that cannot be translated yields an error response and a clean exit.

use std::path::Path;

use serde_json::{json, Value};

use crate::ast::FilterTree;
use crate::config::TranslatorConfig;
use crate::criteria::StrategyRegistry;
use crate::relation::{Relation, RelationLoader};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{error_response, ok_response, read_request, write_value};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Translate { relation, config } => translate(&relation, config.as_deref()),
        Command::Operators { config } => operators(config.as_deref()),
    }
}

/// Load the config file if one was given, and apply its log level
pub fn load_config(path: Option<&Path>) -> CliResult<TranslatorConfig> {
    let config = match path {
        Some(path) => TranslatorConfig::load(path)?,
        None => TranslatorConfig::default(),
    };
    config.apply_logging()?;
    Ok(config)
}

/// Translate one filter tree from stdin against the relation at `relation_path`
pub fn translate(relation_path: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let registry = StrategyRegistry::from_config(&config)?;
    let relation = RelationLoader::load_file(relation_path)?;

    let request = read_request()?;
    let response = handle_translate(&registry, &relation, request)?;
    write_value(&response)
}

/// Build the response for one translate request
///
/// A request that is not a filter tree is an error; a tree that fails to
/// translate produces an error response.
pub fn handle_translate(
    registry: &StrategyRegistry,
    relation: &Relation,
    request: Value,
) -> CliResult<Value> {
    let tree: FilterTree = serde_json::from_value(request)
        .map_err(|e| CliError::invalid_request(format!("Not a filter tree: {}", e)))?;

    let response = match registry.translate(relation, &tree) {
        Ok(condition) => ok_response(json!({
            "condition": condition.to_string(),
            "leaves": condition.leaf_count(),
        })),
        Err(e) => error_response(e.code(), &e.to_string()),
    };

    Ok(response)
}

/// List the registered operator symbols
pub fn operators(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let registry = StrategyRegistry::from_config(&config)?;
    write_value(&ok_response(operator_listing(&registry)))
}

/// Symbol table as JSON, sorted by symbol
pub fn operator_listing(registry: &StrategyRegistry) -> Value {
    let operators: Vec<Value> = registry
        .entries()
        .into_iter()
        .map(|(symbol, strategy)| {
            json!({
                "symbol": symbol,
                "strategy": strategy.name(),
                "arity": strategy.arity().to_string(),
            })
        })
        .collect();

    json!({ "operators": operators })
}
