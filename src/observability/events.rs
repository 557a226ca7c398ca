//! Observable events
//!
//! Every log line carries one of these as its `event` field, so log
//! consumers can filter on a fixed vocabulary.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,
    /// Schema added to a registry
    SchemaRegistered,
    /// Schema files loaded from a directory
    SchemasLoaded,
    /// Schema written to disk
    SchemaExported,

    // Validation
    /// Record accepted
    ValidationPassed,
    /// Record rejected with field errors
    ValidationFailed,
    /// Batch of records validated
    BatchComplete,

    // Command line
    /// Command finished with a configuration or I/O error
    CommandFailed,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaExported => "SCHEMA_EXPORTED",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::BatchComplete => "BATCH_COMPLETE",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
