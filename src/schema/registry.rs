//! Immutable name → schema registry
//!
//! Schemas are registered once at startup and never replaced. After
//! construction the registry is only read, so it can be shared freely
//! between threads.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::messages::Catalog;
use crate::observability::Event;

use super::builtin;
use super::errors::{ConfigError, ConfigResult};
use super::loader::SchemaLoader;
use super::result::{BatchReport, ValidationResult};
use super::types::Schema;
use super::validator::SchemaValidator;

/// Registry of named schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the predefined schemas.
    pub fn with_builtins() -> ConfigResult<Self> {
        let mut registry = Self::new();
        for schema in builtin::all()? {
            registry.register(schema)?;
        }
        Ok(registry)
    }

    /// Registers a schema after checking its structure.
    ///
    /// Names are unique; a second registration under the same name fails.
    pub fn register(&mut self, schema: Schema) -> ConfigResult<()> {
        schema.validate_structure()?;

        if self.schemas.contains_key(&schema.name) {
            return Err(ConfigError::DuplicateSchema(schema.name.clone()));
        }

        debug!(
            event = Event::SchemaRegistered.as_str(),
            schema = %schema.name,
            fields = schema.fields.len()
        );
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Registers every schema file in `dir`. Returns the number loaded.
    pub fn load_dir(&mut self, dir: &Path) -> ConfigResult<usize> {
        let schemas = SchemaLoader::new(dir).load_all()?;
        let count = schemas.len();
        for schema in schemas {
            self.register(schema)?;
        }

        info!(
            event = Event::SchemasLoaded.as_str(),
            dir = %dir.display(),
            count
        );
        Ok(count)
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> ConfigResult<&Schema> {
        self.schemas
            .get(name)
            .ok_or_else(|| ConfigError::UnknownSchema(name.to_string()))
    }

    /// Checks if a schema exists.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// All registered schemas, sorted by name.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Validates `record` against the schema registered as `name`.
    ///
    /// An unknown name is a configuration error, never an `Invalid` result.
    pub fn validate(
        &self,
        name: &str,
        record: &serde_json::Value,
        catalog: &Catalog,
    ) -> ConfigResult<ValidationResult> {
        let schema = self.get(name)?;
        Ok(SchemaValidator::new(catalog).validate(schema, record))
    }

    /// Validates each record independently against one schema.
    pub fn validate_batch(
        &self,
        name: &str,
        records: &[serde_json::Value],
        catalog: &Catalog,
    ) -> ConfigResult<BatchReport> {
        let schema = self.get(name)?;
        let validator = SchemaValidator::new(catalog);

        let mut report = BatchReport::new(name);
        for (row, record) in records.iter().enumerate() {
            report.push(row, validator.validate(schema, record));
        }
        Ok(report)
    }
}
