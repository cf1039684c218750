//! Observable events
//!
//! Events are explicit and typed; each carries its own severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Startup
    /// Translator configuration loaded
    ConfigLoaded,
    /// Relation metadata loaded from disk
    RelationLoaded,

    // Translation
    /// Strategy registry constructed
    RegistryBuilt,
    /// Condition built for a node
    ConditionBuilt,
    /// Node carried an operator with no strategy
    OperatorRejected,
    /// Node failed field resolution or coercion
    TranslationFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RelationLoaded => "RELATION_LOADED",
            Event::RegistryBuilt => "REGISTRY_BUILT",
            Event::ConditionBuilt => "CONDITION_BUILT",
            Event::OperatorRejected => "OPERATOR_REJECTED",
            Event::TranslationFailed => "TRANSLATION_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConditionBuilt | Event::RegistryBuilt => Severity::Trace,
            Event::ConfigLoaded | Event::RelationLoaded => Severity::Info,
            Event::OperatorRejected | Event::TranslationFailed => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::RelationLoaded,
            Event::RegistryBuilt,
            Event::ConditionBuilt,
            Event::OperatorRejected,
            Event::TranslationFailed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::ConditionBuilt.severity(), Severity::Trace);
        assert_eq!(Event::ConfigLoaded.severity(), Severity::Info);
        assert_eq!(Event::OperatorRejected.severity(), Severity::Warn);
    }

    #[test]
    fn test_registry_built_below_default_threshold() {
        // Registries are built per caller; only TRACE shows them
        assert_eq!(Event::RegistryBuilt.severity(), Severity::Trace);
        assert!(Event::RegistryBuilt.severity() < Severity::Info);
    }
}
