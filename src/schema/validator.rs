//! Record validation against a schema
//!
//! Validation semantics:
//! - Declared fields are checked in declaration order
//! - Absent optional fields are skipped; absent required fields fail
//! - Kinds must match exactly; no coercion (`"42"` is not a number)
//! - A `date` value must parse as a date, with or without a
//!   `parseable_date` constraint
//! - Constraints run bounds → pattern → enum membership → predicates,
//!   and the first failure is the field's only message
//! - Every field is checked, so one pass reports every invalid field
//! - Undeclared input fields are ignored and dropped from the output
//!
//! The validator holds no state beyond the borrowed catalog and never
//! mutates its inputs; the same schema and record give the same result.

use serde_json::{Map, Value};

use crate::messages::{keys, Catalog};

use super::predicates::{file_descriptor, is_mime_allowed, is_parseable_date, json_type_name};
use super::result::{FieldErrors, ValidationResult};
use super::types::{Constraint, FieldDef, FieldKind, FieldRule, Schema, Stage};

/// Path reported when the record itself is not an object
pub const ROOT_PATH: &str = "$root";

/// Schema validator that renders messages through a catalog.
pub struct SchemaValidator<'a> {
    catalog: &'a Catalog,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator backed by the given catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Validates a record against a schema.
    ///
    /// A record that is not a JSON object yields `Invalid` with the single
    /// path [`ROOT_PATH`].
    pub fn validate(&self, schema: &Schema, record: &Value) -> ValidationResult {
        let obj = match record.as_object() {
            Some(obj) => obj,
            None => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    ROOT_PATH.to_string(),
                    self.catalog.render(
                        keys::INVALID_TYPE,
                        &[
                            ("field", ROOT_PATH),
                            ("expected", "object"),
                            ("actual", json_type_name(record)),
                        ],
                    ),
                );
                return ValidationResult::Invalid(errors);
            }
        };

        let mut errors = FieldErrors::new();
        let normalized = self.validate_fields(&schema.fields, obj, "", &mut errors);

        if errors.is_empty() {
            ValidationResult::Valid(normalized)
        } else {
            ValidationResult::Invalid(errors)
        }
    }

    /// Validates declared fields of one object level and returns the
    /// normalized object. Errors are collected into `errors`.
    fn validate_fields(
        &self,
        fields: &[FieldDef],
        obj: &Map<String, Value>,
        path_prefix: &str,
        errors: &mut FieldErrors,
    ) -> Map<String, Value> {
        let mut normalized = Map::new();

        for field in fields {
            let field_path = make_path(path_prefix, &field.name);

            match obj.get(&field.name) {
                Some(value) => {
                    if let Some(accepted) =
                        self.validate_value(&field.rule, value, &field_path, errors)
                    {
                        normalized.insert(field.name.clone(), accepted);
                    }
                }
                None => {
                    if !field.rule.optional {
                        errors.insert(
                            field_path.clone(),
                            self.catalog
                                .render(keys::REQUIRED, &[("field", field_path.as_str())]),
                        );
                    }
                }
            }
        }

        normalized
    }

    /// Validates one value. Returns the normalized value when it passed.
    fn validate_value(
        &self,
        rule: &FieldRule,
        value: &Value,
        field_path: &str,
        errors: &mut FieldErrors,
    ) -> Option<Value> {
        if !kind_matches(&rule.kind, value) {
            errors.insert(field_path.to_string(), self.type_mismatch(rule, value, field_path));
            return None;
        }

        if let Some(message) = self.first_failure(rule, value, field_path) {
            errors.insert(field_path.to_string(), message);
            return None;
        }

        match &rule.kind {
            FieldKind::Object { fields } => {
                let before = errors.len();
                let obj = value.as_object()?;
                let nested = self.validate_fields(fields, obj, field_path, errors);
                (errors.len() == before).then_some(Value::Object(nested))
            }
            FieldKind::Array { element } => {
                let before = errors.len();
                let items = value.as_array()?;
                let accepted: Vec<Value> = items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| {
                        let elem_path = format!("{}.{}", field_path, i);
                        self.validate_value(element, item, &elem_path, errors)
                    })
                    .collect();
                (errors.len() == before).then_some(Value::Array(accepted))
            }
            _ => Some(value.clone()),
        }
    }

    /// Runs constraints stage by stage and returns the first failing message.
    fn first_failure(&self, rule: &FieldRule, value: &Value, field_path: &str) -> Option<String> {
        for stage in Stage::ORDER {
            if stage == Stage::Membership {
                if let FieldKind::Enum { values } = &rule.kind {
                    let candidate = value.as_str().unwrap_or_default();
                    if !values.iter().any(|v| v == candidate) {
                        return Some(self.enum_mismatch(rule, values, field_path));
                    }
                }
            }

            if stage == Stage::Predicate && !date_holds(rule, value) {
                let key = rule.message.as_deref().unwrap_or(keys::INVALID_DATE);
                return Some(self.catalog.render(key, &[("field", field_path)]));
            }

            for constraint in rule.constraints.iter().filter(|c| c.stage() == stage) {
                if !constraint_holds(constraint, value) {
                    return Some(
                        self.catalog
                            .render(constraint.message(), &[("field", field_path)]),
                    );
                }
            }
        }
        None
    }

    fn type_mismatch(&self, rule: &FieldRule, value: &Value, field_path: &str) -> String {
        let key = rule.message.as_deref().unwrap_or(keys::INVALID_TYPE);
        self.catalog.render(
            key,
            &[
                ("field", field_path),
                ("expected", rule.kind.type_name()),
                ("actual", json_type_name(value)),
            ],
        )
    }

    fn enum_mismatch(&self, rule: &FieldRule, values: &[String], field_path: &str) -> String {
        let key = rule.message.as_deref().unwrap_or(keys::INVALID_ENUM);
        let expected = values.join(", ");
        self.catalog
            .render(key, &[("field", field_path), ("expected", &expected)])
    }
}

/// Whether the runtime kind of `value` matches `kind`.
fn kind_matches(kind: &FieldKind, value: &Value) -> bool {
    match kind {
        FieldKind::String | FieldKind::Enum { .. } | FieldKind::Date => value.is_string(),
        FieldKind::Number => value.is_number(),
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::File => file_descriptor(value).is_some(),
        FieldKind::Any => true,
        FieldKind::Object { .. } => value.is_object(),
        FieldKind::Array { .. } => value.is_array(),
    }
}

/// Date fields must parse even without an explicit `parseable_date`
/// constraint; an explicit one reports its own message instead.
fn date_holds(rule: &FieldRule, value: &Value) -> bool {
    let explicit = rule
        .constraints
        .iter()
        .any(|c| matches!(c, Constraint::ParseableDate { .. }));
    match (&rule.kind, value.as_str()) {
        (FieldKind::Date, Some(s)) if !explicit => is_parseable_date(s),
        _ => true,
    }
}

/// Evaluates one constraint against a value whose kind already matched.
fn constraint_holds(constraint: &Constraint, value: &Value) -> bool {
    match constraint {
        Constraint::MinLength { value: min, .. } => length_of(value).map_or(true, |n| n >= *min),
        Constraint::MaxLength { value: max, .. } => length_of(value).map_or(true, |n| n <= *max),
        Constraint::Min { value: min, .. } => value.as_f64().map_or(true, |n| n >= *min),
        Constraint::Max { value: max, .. } => value.as_f64().map_or(true, |n| n <= *max),
        Constraint::Pattern { regex, .. } => value.as_str().map_or(true, |s| regex.is_match(s)),
        Constraint::ParseableDate { .. } => value.as_str().map_or(true, is_parseable_date),
        Constraint::MaxFileSize { bytes, .. } => {
            file_descriptor(value).map_or(true, |(size, _)| size <= *bytes)
        }
        Constraint::MimeTypes { allowed, .. } => {
            file_descriptor(value).map_or(true, |(_, mime)| is_mime_allowed(allowed, mime))
        }
    }
}

/// Characters for strings, elements for arrays.
fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use serde_json::json;

    fn users_schema() -> Schema {
        Schema::new(
            "users",
            vec![
                FieldDef::new(
                    "name",
                    FieldRule::string()
                        .min_length(2, "name too short")
                        .max_length(10, "name too long"),
                ),
                FieldDef::new("age", FieldRule::number().min(0.0, "age negative").optional()),
                FieldDef::new("active", FieldRule::boolean()),
            ],
        )
    }

    fn english() -> Catalog {
        Catalog::for_locale(Locale::En)
    }

    #[test]
    fn test_valid_record_passes() {
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(&users_schema(), &json!({"name": "Alice", "active": true}));
        assert!(result.is_valid());
        assert_eq!(
            Value::Object(result.data().unwrap().clone()),
            json!({"name": "Alice", "active": true})
        );
    }

    #[test]
    fn test_missing_required_field_fails() {
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(&users_schema(), &json!({"active": true}));
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["name"], "name is required");
    }

    #[test]
    fn test_type_mismatch_stops_field() {
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(&users_schema(), &json!({"name": 5, "active": true}));
        assert_eq!(result.errors().unwrap()["name"], "Expected string, received number");
    }

    #[test]
    fn test_no_coercion() {
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(
            &users_schema(),
            &json!({"name": "Alice", "age": "30", "active": "true"}),
        );
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("age"));
        assert!(errors.contains_key("active"));
    }

    #[test]
    fn test_null_is_type_mismatch() {
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(&users_schema(), &json!({"name": null, "active": true}));
        assert_eq!(result.errors().unwrap()["name"], "Expected string, received null");
    }

    #[test]
    fn test_first_failing_constraint_wins() {
        let schema = Schema::new(
            "codes",
            vec![FieldDef::new(
                "code",
                FieldRule::string()
                    .pattern(r"[A-Z]\d{3}", "bad pattern")
                    .unwrap()
                    .max_length(3, "too long"),
            )],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        // Bounds run before pattern even though pattern was declared first.
        let result = validator.validate(&schema, &json!({"code": "abcd"}));
        assert_eq!(result.errors().unwrap()["code"], "too long");

        let result = validator.validate(&schema, &json!({"code": "abc"}));
        assert_eq!(result.errors().unwrap()["code"], "bad pattern");
    }

    #[test]
    fn test_enum_membership_case_sensitive() {
        let schema = Schema::new(
            "roles",
            vec![FieldDef::new("role", FieldRule::one_of(["parent", "teacher"]))],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        assert!(validator.validate(&schema, &json!({"role": "parent"})).is_valid());
        let result = validator.validate(&schema, &json!({"role": "Parent"}));
        assert_eq!(result.errors().unwrap()["role"], "role must be one of: parent, teacher");
    }

    #[test]
    fn test_inclusive_numeric_bounds() {
        let schema = Schema::new(
            "scores",
            vec![FieldDef::new("score", FieldRule::number().min(0.0, "lo").max(100.0, "hi"))],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        assert!(validator.validate(&schema, &json!({"score": 0})).is_valid());
        assert!(validator.validate(&schema, &json!({"score": 100})).is_valid());
        assert!(validator.validate(&schema, &json!({"score": 99.5})).is_valid());
        assert_eq!(validator.validate(&schema, &json!({"score": -0.5})).errors().unwrap()["score"], "lo");
        assert_eq!(validator.validate(&schema, &json!({"score": 100.01})).errors().unwrap()["score"], "hi");
    }

    #[test]
    fn test_unknown_fields_dropped() {
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(
            &users_schema(),
            &json!({"name": "Alice", "active": true, "extra": 1}),
        );
        assert!(!result.data().unwrap().contains_key("extra"));
    }

    #[test]
    fn test_non_object_record() {
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(&users_schema(), &json!(["not", "a", "record"]));
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[ROOT_PATH], "Expected object, received array");
    }

    #[test]
    fn test_nested_object_paths() {
        let schema = Schema::new(
            "guardians",
            vec![FieldDef::new(
                "guardian",
                FieldRule::object(vec![
                    FieldDef::new("name", FieldRule::string().min_length(2, "short")),
                    FieldDef::new("phone", FieldRule::string().pattern(r"05\d{8}", "phone").unwrap()),
                ]),
            )],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(
            &schema,
            &json!({"guardian": {"name": "A", "phone": "0512345678", "nick": "x"}}),
        );
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["guardian.name"], "short");

        let result = validator.validate(
            &schema,
            &json!({"guardian": {"name": "Amal", "phone": "0512345678", "nick": "x"}}),
        );
        assert_eq!(
            Value::Object(result.data().unwrap().clone()),
            json!({"guardian": {"name": "Amal", "phone": "0512345678"}})
        );
    }

    #[test]
    fn test_array_element_paths() {
        let schema = Schema::new(
            "tags",
            vec![FieldDef::new(
                "tags",
                FieldRule::array(FieldRule::string().min_length(1, "empty tag"))
                    .max_length(3, "too many tags"),
            )],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(&schema, &json!({"tags": ["a", 2, ""]}));
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["tags.1"], "Expected string, received number");
        assert_eq!(errors["tags.2"], "empty tag");

        let result = validator.validate(&schema, &json!({"tags": ["a", "b", "c", "d"]}));
        assert_eq!(result.errors().unwrap()["tags"], "too many tags");
    }

    #[test]
    fn test_any_accepts_null() {
        let schema = Schema::new("wrap", vec![FieldDef::new("data", FieldRule::any())]);
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(&schema, &json!({"data": null}));
        assert!(result.is_valid());
        assert_eq!(result.data().unwrap()["data"], Value::Null);
    }

    #[test]
    fn test_rule_message_overrides_type_mismatch() {
        let schema = Schema::new(
            "roles",
            vec![FieldDef::new(
                "role",
                FieldRule::one_of(["parent"]).message("Pick a valid role"),
            )],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        assert_eq!(validator.validate(&schema, &json!({"role": 1})).errors().unwrap()["role"], "Pick a valid role");
        assert_eq!(validator.validate(&schema, &json!({"role": "x"})).errors().unwrap()["role"], "Pick a valid role");
    }

    #[test]
    fn test_string_length_counts_characters() {
        let schema = Schema::new(
            "names",
            vec![FieldDef::new("name", FieldRule::string().max_length(3, "long"))],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        // Three Arabic letters: six bytes, three characters.
        assert!(validator.validate(&schema, &json!({"name": "علي"})).is_valid());
    }

    #[test]
    fn test_date_kind_requires_parseable_string() {
        let schema = Schema::new(
            "events",
            vec![
                FieldDef::new("when", FieldRule::date()),
                FieldDef::new("until", FieldRule::date().message("Bad end date").optional()),
            ],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        assert!(validator.validate(&schema, &json!({"when": "2024-01-20"})).is_valid());

        let result = validator.validate(&schema, &json!({"when": "not a date", "until": "soon"}));
        let errors = result.errors().unwrap();
        assert_eq!(errors["when"], "Invalid date");
        assert_eq!(errors["until"], "Bad end date");
    }

    #[test]
    fn test_explicit_date_constraint_message_wins() {
        let schema = Schema::new(
            "events",
            vec![FieldDef::new("when", FieldRule::date().parseable_date("When must be a date"))],
        );
        let catalog = english();
        let validator = SchemaValidator::new(&catalog);

        let result = validator.validate(&schema, &json!({"when": "someday"}));
        assert_eq!(result.errors().unwrap()["when"], "When must be a date");
    }
}
