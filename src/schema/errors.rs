//! Configuration error types
//!
//! Error codes:
//! - SCHOOLVAL_UNKNOWN_SCHEMA
//! - SCHOOLVAL_MALFORMED_RULE
//! - SCHOOLVAL_MALFORMED_SCHEMA
//! - SCHOOLVAL_DUPLICATE_SCHEMA
//! - SCHOOLVAL_SCHEMA_IO
//!
//! These are programming or deployment errors. A record that fails its
//! schema is not an error; it is an `Invalid` validation result.

use std::fmt;

use thiserror::Error;

/// Configuration error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    /// Schema name not registered
    UnknownSchema,
    /// A field rule is not well formed
    MalformedRule,
    /// The schema as a whole is not well formed
    MalformedSchema,
    /// Attempt to replace a registered schema
    DuplicateSchema,
    /// Schema file could not be read or written
    SchemaIo,
}

impl ConfigErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigErrorCode::UnknownSchema => "SCHOOLVAL_UNKNOWN_SCHEMA",
            ConfigErrorCode::MalformedRule => "SCHOOLVAL_MALFORMED_RULE",
            ConfigErrorCode::MalformedSchema => "SCHOOLVAL_MALFORMED_SCHEMA",
            ConfigErrorCode::DuplicateSchema => "SCHOOLVAL_DUPLICATE_SCHEMA",
            ConfigErrorCode::SchemaIo => "SCHOOLVAL_SCHEMA_IO",
        }
    }
}

impl fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("schema '{0}' is not registered")]
    UnknownSchema(String),

    #[error("schema '{schema}' field '{field}': {reason}")]
    MalformedRule {
        schema: String,
        field: String,
        reason: String,
    },

    #[error("schema '{schema}': {reason}")]
    MalformedSchema { schema: String, reason: String },

    #[error("schema '{0}' is already registered and cannot be replaced")]
    DuplicateSchema(String),

    #[error("schema file '{path}': {reason}")]
    SchemaIo { path: String, reason: String },
}

impl ConfigError {
    /// Returns the error code
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::UnknownSchema(_) => ConfigErrorCode::UnknownSchema,
            ConfigError::MalformedRule { .. } => ConfigErrorCode::MalformedRule,
            ConfigError::MalformedSchema { .. } => ConfigErrorCode::MalformedSchema,
            ConfigError::DuplicateSchema(_) => ConfigErrorCode::DuplicateSchema,
            ConfigError::SchemaIo { .. } => ConfigErrorCode::SchemaIo,
        }
    }

    pub(crate) fn io(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        ConfigError::SchemaIo {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for schema configuration
pub type ConfigResult<T> = Result<T, ConfigError>;
