//! Configuration errors
//!
//! Raised while loading a config file or building a registry from it.

use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the config shape
    #[error("Malformed config file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// `log_level` is not a known severity
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Alias key or target is blank
    #[error("{kind} alias entries must not be empty")]
    EmptyAlias { kind: &'static str },

    /// Operator alias points at a symbol with no strategy
    #[error("Operator alias '{alias}' targets unregistered symbol '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    /// Operator alias is already a registered symbol
    #[error("Operator alias '{alias}' is already registered")]
    ConflictingAlias { alias: String },
}

impl ConfigError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "RSQL_CONFIG_IO",
            ConfigError::Malformed { .. } => "RSQL_CONFIG_MALFORMED",
            ConfigError::InvalidLogLevel(_) => "RSQL_CONFIG_INVALID_LOG_LEVEL",
            ConfigError::EmptyAlias { .. } => "RSQL_CONFIG_EMPTY_ALIAS",
            ConfigError::UnknownAliasTarget { .. } => "RSQL_CONFIG_UNKNOWN_ALIAS_TARGET",
            ConfigError::ConflictingAlias { .. } => "RSQL_CONFIG_CONFLICTING_ALIAS",
        }
    }
}
