//! Translator configuration
//!
//! Loaded once at startup from a JSON file. Every field is optional:
//!
//! ```json
//! {
//!   "operator_aliases": {"=between=": "=bt="},
//!   "selector_aliases": {"name": "USER_NAME"},
//!   "log_level": "info"
//! }
//! ```

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Logger, Severity, Event};

/// Translator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Extra operator symbols, alias → registered symbol
    #[serde(default)]
    pub operator_aliases: BTreeMap<String, String>,

    /// Selector aliases, alias → column name
    #[serde(default)]
    pub selector_aliases: BTreeMap<String, String>,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            operator_aliases: BTreeMap::new(),
            selector_aliases: BTreeMap::new(),
            log_level: default_log_level(),
        }
    }
}

impl TranslatorConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        let config: TranslatorConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Malformed {
                path: display.clone(),
                source,
            })?;
        config.validate()?;

        let operator_aliases = config.operator_aliases.len().to_string();
        let selector_aliases = config.selector_aliases.len().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("log_level", config.log_level.as_str()),
                ("operator_aliases", operator_aliases.as_str()),
                ("path", display.as_str()),
                ("selector_aliases", selector_aliases.as_str()),
            ],
        );

        Ok(config)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: TranslatorConfig =
            serde_json::from_str(content).map_err(|source| ConfigError::Malformed {
                path: "<inline>".to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check field contents the JSON shape cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        self.severity()?;

        let blank = |map: &BTreeMap<String, String>| {
            map.iter()
                .any(|(k, v)| k.trim().is_empty() || v.trim().is_empty())
        };
        if blank(&self.operator_aliases) {
            return Err(ConfigError::EmptyAlias { kind: "Operator" });
        }
        if blank(&self.selector_aliases) {
            return Err(ConfigError::EmptyAlias { kind: "Selector" });
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(ConfigError::InvalidLogLevel)
    }

    /// Apply `log_level` to the process-wide logger
    pub fn apply_logging(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }
}
