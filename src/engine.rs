//! Validation engine: a schema registry paired with a message catalog.
//!
//! This is the entry point callers hold on to. It is built once, then
//! only read; `validate` calls are independent of each other.

use serde_json::Value;
use tracing::debug;

use crate::messages::{Catalog, Locale};
use crate::observability::Event;
use crate::schema::{BatchReport, ConfigResult, Report, Schema, SchemaRegistry, ValidationResult};

/// Registry + catalog
#[derive(Debug, Clone)]
pub struct Engine {
    registry: SchemaRegistry,
    catalog: Catalog,
}

impl Engine {
    pub fn new(registry: SchemaRegistry, catalog: Catalog) -> Self {
        Self { registry, catalog }
    }

    /// Engine over the predefined schemas with the built-in catalog for `locale`.
    pub fn builtin(locale: Locale) -> ConfigResult<Self> {
        Ok(Self::new(
            SchemaRegistry::with_builtins()?,
            Catalog::for_locale(locale),
        ))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn locale(&self) -> Locale {
        self.catalog.locale()
    }

    /// Looks up a schema by name.
    pub fn schema(&self, name: &str) -> ConfigResult<&Schema> {
        self.registry.get(name)
    }

    /// Validates one record against the named schema.
    pub fn validate(&self, schema: &str, record: &Value) -> ConfigResult<ValidationResult> {
        let result = self.registry.validate(schema, record, &self.catalog)?;

        if result.is_valid() {
            debug!(event = Event::ValidationPassed.as_str(), schema);
        } else {
            debug!(
                event = Event::ValidationFailed.as_str(),
                schema,
                errors = result.error_count()
            );
        }
        Ok(result)
    }

    /// Validates one record and returns the wire report.
    pub fn report(&self, schema: &str, record: &Value) -> ConfigResult<Report> {
        self.validate(schema, record).map(ValidationResult::into_report)
    }

    /// Validates rows independently, as in a spreadsheet import.
    pub fn validate_batch(&self, schema: &str, records: &[Value]) -> ConfigResult<BatchReport> {
        let report = self.registry.validate_batch(schema, records, &self.catalog)?;

        debug!(
            event = Event::BatchComplete.as_str(),
            schema,
            accepted = report.accepted,
            rejected = report.rejected
        );
        Ok(report)
    }
}
