//! CLI command implementations
//!
//! Each command builds what it needs from the configuration, does its
//! work, and writes one JSON document to stdout. Validation failures are
//! reported as data and surface as [`Outcome::Rejected`].

use std::path::Path;

use serde_json::{json, Value};
use tracing::info;

use crate::observability::{self, Event};
use crate::schema::{builtin, json_type_name, FieldDef, Schema, SchemaLoader, SchemaRegistry};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_response};

/// How a successful command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything accepted
    Accepted,
    /// At least one record was invalid
    Rejected,
}

impl Outcome {
    /// Process exit code: 0 accepted, 2 rejected
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Accepted => 0,
            Outcome::Rejected => 2,
        }
    }
}

/// Resolve configuration, install logging and run the command
pub fn run_command(cli: Cli) -> CliResult<Outcome> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }

    observability::init(&config.log.level, config.log.json);
    if let Some(path) = &cli.config {
        info!(
            event = Event::ConfigLoaded.as_str(),
            path = %path.display(),
            locale = %config.locale
        );
    }

    match cli.command {
        Command::Validate {
            schema,
            input,
            batch,
        } => validate(&config, &schema, input.as_deref(), batch),
        Command::Schemas => schemas(&config),
        Command::Check { schema_dir } => check(&schema_dir),
        Command::Export { out } => export(&out),
    }
}

/// Validate one record, or an array of records with `batch`
pub fn validate(
    config: &Config,
    schema: &str,
    input: Option<&Path>,
    batch: bool,
) -> CliResult<Outcome> {
    let engine = config.engine()?;
    let value = read_input(input)?;

    if batch {
        let records = match value {
            Value::Array(records) => records,
            other => {
                return Err(CliError::input_error(format!(
                    "--batch expects a JSON array, got {}",
                    json_type_name(&other)
                )))
            }
        };
        let report = engine.validate_batch(schema, &records)?;
        write_response(&report)?;
        return Ok(if report.all_valid() {
            Outcome::Accepted
        } else {
            Outcome::Rejected
        });
    }

    let report = engine.report(schema, &value)?;
    let outcome = if report.is_valid {
        Outcome::Accepted
    } else {
        Outcome::Rejected
    };
    write_response(&report)?;
    Ok(outcome)
}

/// List registered schemas
pub fn schemas(config: &Config) -> CliResult<Outcome> {
    let registry = config.registry()?;
    write_response(&describe(&registry))?;
    Ok(Outcome::Accepted)
}

/// Load every schema file in `dir` into an empty registry
pub fn check(dir: &Path) -> CliResult<Outcome> {
    let mut registry = SchemaRegistry::new();
    registry.load_dir(dir)?;
    write_response(&json!({
        "status": "ok",
        "schemas": registry.names().collect::<Vec<_>>(),
    }))?;
    Ok(Outcome::Accepted)
}

/// Write the predefined schemas to `out`
pub fn export(out: &Path) -> CliResult<Outcome> {
    let loader = SchemaLoader::new(out);
    let mut written = Vec::new();
    for schema in builtin::all()? {
        let path = loader.save_schema(&schema)?;
        info!(
            event = Event::SchemaExported.as_str(),
            schema = %schema.name,
            path = %path.display()
        );
        written.push(path.display().to_string());
    }
    write_response(&json!({ "status": "ok", "files": written }))?;
    Ok(Outcome::Accepted)
}

/// Summary of every schema: name, description and field list
pub fn describe(registry: &SchemaRegistry) -> Value {
    Value::Array(registry.schemas().map(describe_schema).collect())
}

fn describe_schema(schema: &Schema) -> Value {
    json!({
        "name": schema.name,
        "description": schema.description,
        "fields": schema.fields.iter().map(describe_field).collect::<Vec<_>>(),
    })
}

fn describe_field(field: &FieldDef) -> Value {
    json!({
        "name": field.name,
        "kind": field.rule.kind.type_name(),
        "optional": field.rule.optional,
        "constraints": field.rule.constraints.iter().map(|c| c.name()).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use std::fs;
    use tempfile::TempDir;

    fn english() -> Config {
        Config {
            locale: Locale::En,
            ..Config::default()
        }
    }

    #[test]
    fn test_validate_file_outcomes() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.json");
        let bad = temp_dir.path().join("bad.json");
        fs::write(&good, r#"{"username": "parent1", "password": "123456", "role": "parent"}"#).unwrap();
        fs::write(&bad, r#"{"username": "ab", "password": "123456", "role": "parent"}"#).unwrap();

        let config = english();
        assert_eq!(validate(&config, "login", Some(good.as_path()), false).unwrap(), Outcome::Accepted);
        assert_eq!(validate(&config, "login", Some(bad.as_path()), false).unwrap(), Outcome::Rejected);
    }

    #[test]
    fn test_validate_unknown_schema_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("r.json");
        fs::write(&input, "{}").unwrap();

        let err = validate(&english(), "teachers", Some(input.as_path()), false).unwrap_err();
        assert_eq!(err.code_str(), "SCHOOLVAL_CLI_SCHEMA_ERROR");
    }

    #[test]
    fn test_batch_requires_array() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("r.json");
        fs::write(&input, "{}").unwrap();

        let err = validate(&english(), "grade", Some(input.as_path()), true).unwrap_err();
        assert_eq!(err.code_str(), "SCHOOLVAL_CLI_INPUT_ERROR");
    }

    #[test]
    fn test_export_then_check() {
        let temp_dir = TempDir::new().unwrap();
        export(temp_dir.path()).unwrap();
        assert_eq!(check(temp_dir.path()).unwrap(), Outcome::Accepted);
    }

    #[test]
    fn test_describe_lists_fields() {
        let registry = SchemaRegistry::with_builtins().unwrap();
        let summary = describe(&registry);
        let grade = summary
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == "grade")
            .unwrap();
        assert_eq!(grade["fields"][1]["name"], "grade");
        assert_eq!(grade["fields"][1]["kind"], "number");
        assert_eq!(grade["fields"][1]["constraints"], json!(["min", "max"]));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Accepted.exit_code(), 0);
        assert_eq!(Outcome::Rejected.exit_code(), 2);
    }
}
