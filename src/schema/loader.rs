//! Schema loader for reading schema definition files at startup
//!
//! - One schema per `*.json` file in the schema directory
//! - Files are read in file-name order so registration is deterministic
//! - Unreadable or malformed files fail loading as a whole

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{ConfigError, ConfigResult};
use super::types::Schema;

/// Reads and writes schema files in one directory.
pub struct SchemaLoader {
    schema_dir: PathBuf,
}

impl SchemaLoader {
    /// Creates a loader for `schema_dir`.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every schema file in the directory.
    ///
    /// Each schema is structure-checked; a missing directory is an error.
    pub fn load_all(&self) -> ConfigResult<Vec<Schema>> {
        let dir = self.schema_dir.display().to_string();

        let entries = fs::read_dir(&self.schema_dir)
            .map_err(|e| ConfigError::io(&dir, format!("failed to read schema directory: {}", e)))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| ConfigError::io(&dir, format!("failed to read directory entry: {}", e)))?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        paths.iter().map(|p| self.load_schema_file(p)).collect()
    }

    /// Loads a single schema file.
    pub fn load_schema_file(&self, path: &Path) -> ConfigResult<Schema> {
        let display = path.display().to_string();

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::io(&display, format!("failed to read file: {}", e)))?;

        let schema: Schema = serde_json::from_str(&content).map_err(|e| {
            ConfigError::MalformedSchema {
                schema: display.clone(),
                reason: format!("invalid schema JSON: {}", e),
            }
        })?;

        schema.validate_structure()?;
        Ok(schema)
    }

    /// Writes a schema to `schema_<name>.json`.
    ///
    /// Existing files are never overwritten.
    pub fn save_schema(&self, schema: &Schema) -> ConfigResult<PathBuf> {
        schema.validate_structure()?;

        let path = self.schema_dir.join(format!("schema_{}.json", schema.name));
        if path.exists() {
            return Err(ConfigError::DuplicateSchema(schema.name.clone()));
        }

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            ConfigError::io(
                self.schema_dir.display().to_string(),
                format!("failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            ConfigError::io(path.display().to_string(), format!("failed to serialize schema: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            ConfigError::io(path.display().to_string(), format!("failed to write file: {}", e))
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin;
    use crate::schema::errors::ConfigErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());

        let schema = builtin::grade();
        let path = loader.save_schema(&schema).unwrap();
        assert!(path.ends_with("schema_grade.json"));

        let loaded = loader.load_all().unwrap();
        assert_eq!(loaded, vec![schema]);
    }

    #[test]
    fn test_patterns_survive_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());

        let schema = builtin::login().unwrap();
        loader.save_schema(&schema).unwrap();
        assert_eq!(loader.load_all().unwrap(), vec![schema]);
    }

    #[test]
    fn test_save_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());

        loader.save_schema(&builtin::grade()).unwrap();
        let err = loader.save_schema(&builtin::grade()).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::DuplicateSchema);
    }

    #[test]
    fn test_load_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());
        assert!(loader.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path().join("absent"));
        assert_eq!(loader.load_all().unwrap_err().code(), ConfigErrorCode::SchemaIo);
    }

    #[test]
    fn test_non_json_files_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README.txt"), "not a schema").unwrap();
        let loader = SchemaLoader::new(temp_dir.path());
        assert!(loader.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bad.json"), "{\"name\": \"x\"").unwrap();
        let loader = SchemaLoader::new(temp_dir.path());
        assert_eq!(loader.load_all().unwrap_err().code(), ConfigErrorCode::MalformedSchema);
    }

    #[test]
    fn test_bad_regex_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let body = r#"{
            "name": "codes",
            "fields": [
                {"name": "code", "type": "string",
                 "constraints": [{"check": "pattern", "regex": "([A-Z", "message": "bad"}]}
            ]
        }"#;
        fs::write(temp_dir.path().join("codes.json"), body).unwrap();
        let loader = SchemaLoader::new(temp_dir.path());
        assert!(loader.load_all().is_err());
    }

    #[test]
    fn test_empty_enum_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let body = r#"{
            "name": "roles",
            "fields": [{"name": "role", "type": "enum", "values": []}]
        }"#;
        fs::write(temp_dir.path().join("roles.json"), body).unwrap();
        let loader = SchemaLoader::new(temp_dir.path());
        assert_eq!(loader.load_all().unwrap_err().code(), ConfigErrorCode::MalformedRule);
    }
}
