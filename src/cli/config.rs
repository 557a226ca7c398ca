//! Configuration file
//!
//! A JSON object; every key is optional:
//!
//! ```json
//! {
//!   "locale": "en",
//!   "include_builtin": true,
//!   "schema_dir": "./schemas",
//!   "messages": { "grade.grade.max": "Out of range" },
//!   "log": { "level": "info", "json": true }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::messages::{Catalog, Locale};
use crate::schema::SchemaRegistry;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Message language (default: ar)
    #[serde(default)]
    pub locale: Locale,

    /// Whether the predefined schemas are registered (default: true)
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Directory of additional schema files
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,

    /// Message template overrides, by key
    #[serde(default)]
    pub messages: HashMap<String, String>,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Env-filter directive (default: "warn")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// One JSON object per line instead of plain text
    #[serde(default)]
    pub json: bool,
}

fn default_include_builtin() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            include_builtin: default_include_builtin(),
            schema_dir: None,
            messages: HashMap::new(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        // Relative schema directories are resolved against the config file.
        if let (Some(dir), Some(parent)) = (config.schema_dir.as_ref(), path.parent()) {
            if dir.is_relative() {
                config.schema_dir = Some(parent.join(dir));
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.log.level.trim().is_empty() {
            return Err(CliError::config_error("log.level must not be empty"));
        }
        if !self.include_builtin && self.schema_dir.is_none() {
            return Err(CliError::config_error(
                "schema_dir is required when include_builtin is false",
            ));
        }
        Ok(())
    }

    /// Message catalog for the configured locale with overrides applied
    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::for_locale(self.locale);
        catalog.extend(self.messages.clone());
        catalog
    }

    /// Builds the schema registry this configuration describes
    pub fn registry(&self) -> CliResult<SchemaRegistry> {
        let mut registry = if self.include_builtin {
            SchemaRegistry::with_builtins()?
        } else {
            SchemaRegistry::new()
        };
        if let Some(dir) = &self.schema_dir {
            registry.load_dir(dir)?;
        }
        Ok(registry)
    }

    /// Builds the engine this configuration describes
    pub fn engine(&self) -> CliResult<Engine> {
        Ok(Engine::new(self.registry()?, self.catalog()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, FieldRule, Schema, SchemaLoader};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale, Locale::Ar);
        assert!(config.include_builtin);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_load_resolves_relative_schema_dir() {
        let temp_dir = TempDir::new().unwrap();
        let schemas = temp_dir.path().join("schemas");
        SchemaLoader::new(&schemas)
            .save_schema(&Schema::new(
                "attendance",
                vec![FieldDef::new("present", FieldRule::boolean())],
            ))
            .unwrap();

        let config_path = temp_dir.path().join("schoolval.json");
        fs::write(&config_path, r#"{"locale": "en", "schema_dir": "schemas"}"#).unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.schema_dir.as_deref(), Some(schemas.as_path()));

        let engine = config.engine().unwrap();
        assert!(engine.registry().contains("attendance"));
        assert!(engine.registry().contains("login"));
        assert!(engine.validate("attendance", &json!({"present": true})).unwrap().is_valid());
    }

    #[test]
    fn test_message_overrides() {
        let mut config = Config::default();
        config.locale = Locale::En;
        config
            .messages
            .insert("grade.grade.max".into(), "Out of range".into());

        let engine = config.engine().unwrap();
        let result = engine
            .validate(
                "grade",
                &json!({"subject": "Math", "grade": 105, "examType": "quiz", "date": "2024-01-20"}),
            )
            .unwrap();
        assert_eq!(result.errors().unwrap()["grade"], "Out of range");
    }

    #[test]
    fn test_builtin_off_needs_schema_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("schoolval.json");
        fs::write(&config_path, r#"{"include_builtin": false}"#).unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert_eq!(err.code_str(), "SCHOOLVAL_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_invalid_json_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("schoolval.json");
        fs::write(&config_path, "{locale: en}").unwrap();
        assert!(Config::load(&config_path).is_err());
    }
}
