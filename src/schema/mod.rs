//! Schema validation subsystem
//!
//! Schemas are declarative, immutable descriptions of a record kind:
//! ordered fields, each with a kind, constraints and an optional flag.
//!
//! # Design Principles
//!
//! - Schemas are built once and never mutated
//! - Validation is pure and deterministic
//! - No nulls (except for `any`), defaults, or coercion
//! - Field failures are values (`ValidationResult::Invalid`);
//!   configuration failures are errors (`ConfigError`)

pub mod builtin;
mod errors;
mod loader;
mod predicates;
mod registry;
mod result;
mod types;
mod validator;

use std::sync::OnceLock;

use serde_json::Value;

use crate::messages::Catalog;

pub use errors::{ConfigError, ConfigErrorCode, ConfigResult};
pub use loader::SchemaLoader;
pub use predicates::{is_parseable_date, json_type_name};
pub use registry::SchemaRegistry;
pub use result::{BatchReport, FieldErrors, Report, RowReport, ValidationResult};
pub use types::{Constraint, FieldDef, FieldKind, FieldRule, Pattern, Schema, Stage};
pub use validator::{SchemaValidator, ROOT_PATH};

/// Validates `record` against `schema` with the default (Arabic) catalog.
pub fn validate(schema: &Schema, record: &Value) -> ValidationResult {
    static DEFAULT_CATALOG: OnceLock<Catalog> = OnceLock::new();
    let catalog = DEFAULT_CATALOG.get_or_init(Catalog::default);
    SchemaValidator::new(catalog).validate(schema, record)
}
