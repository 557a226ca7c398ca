//! Schema type definitions
//!
//! Supported field kinds:
//! - string: UTF-8 string
//! - number: JSON number (integer or float)
//! - boolean: JSON boolean
//! - enum: string from a fixed value set
//! - date: string parseable as a date
//! - file: upload descriptor object (`name`, `size`, `type`)
//! - any: any value, including null
//! - object: nested record with its own ordered field rules
//! - array: homogeneous array with a single element rule

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{ConfigError, ConfigResult};

/// Expected value kind of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// String restricted to a fixed value set (case-sensitive)
    Enum {
        /// Allowed values
        values: Vec<String>,
    },
    /// String that must parse as a date
    Date,
    /// Upload descriptor
    File,
    /// Anything
    Any,
    /// Nested record
    Object {
        /// Nested field definitions, in declaration order
        fields: Vec<FieldDef>,
    },
    /// Homogeneous array
    Array {
        /// Element rule (boxed to allow recursive types)
        element: Box<FieldRule>,
    },
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum { .. } => "enum",
            FieldKind::Date => "date",
            FieldKind::File => "file",
            FieldKind::Any => "any",
            FieldKind::Object { .. } => "object",
            FieldKind::Array { .. } => "array",
        }
    }

    /// Whether the kind is carried by a JSON string
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::String | FieldKind::Enum { .. } | FieldKind::Date
        )
    }
}

/// Regex that must match a whole string.
///
/// Serialized as the source text; compiled anchored as `^(?:source)$`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self { source, regex })
    }

    /// Returns the pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whole-string match.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(source).map_err(serde::de::Error::custom)
    }
}

/// Evaluation stage of a constraint.
///
/// Constraints run stage by stage in this order regardless of how they
/// were declared; within a stage, declaration order holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Length and numeric range bounds
    Bounds,
    /// Regex pattern
    Pattern,
    /// Enum membership
    Membership,
    /// Custom predicates
    Predicate,
}

impl Stage {
    /// All stages in evaluation order
    pub const ORDER: [Stage; 4] = [
        Stage::Bounds,
        Stage::Pattern,
        Stage::Membership,
        Stage::Predicate,
    ];
}

/// A single check attached to a field.
///
/// `message` is a catalog key; keys without a catalog entry are shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Constraint {
    /// Minimum length in characters (strings) or elements (arrays)
    MinLength { value: usize, message: String },
    /// Maximum length in characters (strings) or elements (arrays)
    MaxLength { value: usize, message: String },
    /// Inclusive lower bound
    Min { value: f64, message: String },
    /// Inclusive upper bound
    Max { value: f64, message: String },
    /// Whole-string regex match
    Pattern { regex: Pattern, message: String },
    /// String parses as a date
    ParseableDate { message: String },
    /// File size ceiling in bytes (inclusive)
    MaxFileSize { bytes: u64, message: String },
    /// File MIME type allow-list; `type/*` entries match a whole family
    MimeTypes { allowed: Vec<String>, message: String },
}

impl Constraint {
    /// Returns the stage this constraint runs in
    pub fn stage(&self) -> Stage {
        match self {
            Constraint::MinLength { .. }
            | Constraint::MaxLength { .. }
            | Constraint::Min { .. }
            | Constraint::Max { .. } => Stage::Bounds,
            Constraint::Pattern { .. } => Stage::Pattern,
            Constraint::ParseableDate { .. }
            | Constraint::MaxFileSize { .. }
            | Constraint::MimeTypes { .. } => Stage::Predicate,
        }
    }

    /// Returns the message key reported when this constraint fails
    pub fn message(&self) -> &str {
        match self {
            Constraint::MinLength { message, .. }
            | Constraint::MaxLength { message, .. }
            | Constraint::Min { message, .. }
            | Constraint::Max { message, .. }
            | Constraint::Pattern { message, .. }
            | Constraint::ParseableDate { message }
            | Constraint::MaxFileSize { message, .. }
            | Constraint::MimeTypes { message, .. } => message,
        }
    }

    /// Short name used in configuration errors
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::MinLength { .. } => "min_length",
            Constraint::MaxLength { .. } => "max_length",
            Constraint::Min { .. } => "min",
            Constraint::Max { .. } => "max",
            Constraint::Pattern { .. } => "pattern",
            Constraint::ParseableDate { .. } => "parseable_date",
            Constraint::MaxFileSize { .. } => "max_file_size",
            Constraint::MimeTypes { .. } => "mime_types",
        }
    }

    /// Whether this constraint can be evaluated against values of `kind`
    pub fn applies_to(&self, kind: &FieldKind) -> bool {
        match self {
            Constraint::MinLength { .. } | Constraint::MaxLength { .. } => {
                kind.is_textual() || matches!(kind, FieldKind::Array { .. })
            }
            Constraint::Min { .. } | Constraint::Max { .. } => matches!(kind, FieldKind::Number),
            Constraint::Pattern { .. } | Constraint::ParseableDate { .. } => kind.is_textual(),
            Constraint::MaxFileSize { .. } | Constraint::MimeTypes { .. } => {
                matches!(kind, FieldKind::File)
            }
        }
    }
}

/// Constraint set attached to one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Expected kind
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Checks applied after the kind matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    /// Whether the field may be absent
    #[serde(default)]
    pub optional: bool,
    /// Message key reported on kind mismatch and failed enum membership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldRule {
    /// Creates a required rule of the given kind with no constraints
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            constraints: Vec::new(),
            optional: false,
            message: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    pub fn file() -> Self {
        Self::new(FieldKind::File)
    }

    pub fn any() -> Self {
        Self::new(FieldKind::Any)
    }

    /// Enum rule over the given values
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Nested object rule
    pub fn object(fields: Vec<FieldDef>) -> Self {
        Self::new(FieldKind::Object { fields })
    }

    /// Array rule with the given element rule
    pub fn array(element: FieldRule) -> Self {
        Self::new(FieldKind::Array {
            element: Box::new(element),
        })
    }

    /// Marks the rule optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the kind-mismatch / membership message
    pub fn message(mut self, key: impl Into<String>) -> Self {
        self.message = Some(key.into());
        self
    }

    /// Appends a constraint
    pub fn check(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn min_length(self, value: usize, message: impl Into<String>) -> Self {
        self.check(Constraint::MinLength {
            value,
            message: message.into(),
        })
    }

    pub fn max_length(self, value: usize, message: impl Into<String>) -> Self {
        self.check(Constraint::MaxLength {
            value,
            message: message.into(),
        })
    }

    pub fn min(self, value: f64, message: impl Into<String>) -> Self {
        self.check(Constraint::Min {
            value,
            message: message.into(),
        })
    }

    pub fn max(self, value: f64, message: impl Into<String>) -> Self {
        self.check(Constraint::Max {
            value,
            message: message.into(),
        })
    }

    /// Appends a whole-string pattern; fails if the regex does not compile
    pub fn pattern(
        self,
        source: &str,
        message: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        let regex = Pattern::new(source)?;
        Ok(self.check(Constraint::Pattern {
            regex,
            message: message.into(),
        }))
    }

    pub fn parseable_date(self, message: impl Into<String>) -> Self {
        self.check(Constraint::ParseableDate {
            message: message.into(),
        })
    }

    pub fn max_file_size(self, bytes: u64, message: impl Into<String>) -> Self {
        self.check(Constraint::MaxFileSize {
            bytes,
            message: message.into(),
        })
    }

    pub fn mime_types<I, S>(self, allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check(Constraint::MimeTypes {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: message.into(),
        })
    }

    /// Checks that the rule is well formed.
    ///
    /// `schema` and `path` only label the returned error.
    pub fn validate_structure(&self, schema: &str, path: &str) -> ConfigResult<()> {
        let malformed = |reason: String| ConfigError::MalformedRule {
            schema: schema.to_string(),
            field: path.to_string(),
            reason,
        };

        match &self.kind {
            FieldKind::Enum { values } => {
                if values.is_empty() {
                    return Err(malformed("enum must declare at least one value".into()));
                }
            }
            FieldKind::Object { fields } => {
                validate_field_list(schema, path, fields)?;
            }
            FieldKind::Array { element } => {
                element.validate_structure(schema, &format!("{}.*", path))?;
            }
            _ => {}
        }

        let mut min_length = None;
        let mut max_length = None;
        let mut min = None;
        let mut max = None;

        for constraint in &self.constraints {
            if !constraint.applies_to(&self.kind) {
                return Err(malformed(format!(
                    "constraint '{}' does not apply to kind '{}'",
                    constraint.name(),
                    self.kind.type_name()
                )));
            }
            match constraint {
                Constraint::MinLength { value, .. } => min_length = Some(*value),
                Constraint::MaxLength { value, .. } => max_length = Some(*value),
                Constraint::Min { value, .. } | Constraint::Max { value, .. }
                    if !value.is_finite() =>
                {
                    return Err(malformed(format!(
                        "constraint '{}' bound must be finite",
                        constraint.name()
                    )));
                }
                Constraint::Min { value, .. } => min = Some(*value),
                Constraint::Max { value, .. } => max = Some(*value),
                Constraint::MimeTypes { allowed, .. } if allowed.is_empty() => {
                    return Err(malformed("mime_types must list at least one type".into()));
                }
                _ => {}
            }
        }

        if let (Some(lo), Some(hi)) = (min_length, max_length) {
            if lo > hi {
                return Err(malformed(format!(
                    "min_length {} exceeds max_length {}",
                    lo, hi
                )));
            }
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(malformed(format!("min {} exceeds max {}", lo, hi)));
            }
        }

        Ok(())
    }
}

/// A named field and its rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name (one path segment)
    pub name: String,
    /// Rule applied to the field's value
    #[serde(flatten)]
    pub rule: FieldRule,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

/// Complete schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique schema name, the registry key
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    /// Attaches a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Looks up a top-level field rule
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.rule)
    }

    /// Returns top-level field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validates the schema structure itself (not a record)
    pub fn validate_structure(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::MalformedSchema {
                schema: self.name.clone(),
                reason: "schema name must not be empty".into(),
            });
        }
        validate_field_list(&self.name, "", &self.fields)
    }
}

fn validate_field_list(schema: &str, prefix: &str, fields: &[FieldDef]) -> ConfigResult<()> {
    for (i, field) in fields.iter().enumerate() {
        if field.name.is_empty() || field.name.contains('.') {
            return Err(ConfigError::MalformedSchema {
                schema: schema.to_string(),
                reason: format!(
                    "field name '{}' must be non-empty and contain no '.'",
                    field.name
                ),
            });
        }
        if fields[..i].iter().any(|f| f.name == field.name) {
            return Err(ConfigError::MalformedSchema {
                schema: schema.to_string(),
                reason: format!("field '{}' is declared twice", field.name),
            });
        }
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        field.rule.validate_structure(schema, &path)?;
    }
    Ok(())
}
