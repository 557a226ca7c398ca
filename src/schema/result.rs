//! Validation verdicts and their wire shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field path → message, one message per path
pub type FieldErrors = BTreeMap<String, String>;

/// Outcome of validating one record.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Accepted; holds only the declared fields that were present
    Valid(Map<String, Value>),
    /// Rejected; holds every failing field path
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// Normalized record, if valid
    pub fn data(&self) -> Option<&Map<String, Value>> {
        match self {
            ValidationResult::Valid(data) => Some(data),
            ValidationResult::Invalid(_) => None,
        }
    }

    /// Field errors, if invalid
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(errors) => Some(errors),
        }
    }

    /// Number of failing field paths
    pub fn error_count(&self) -> usize {
        self.errors().map_or(0, BTreeMap::len)
    }

    /// Converts to the `{ isValid, data?, errors? }` wire shape
    pub fn into_report(self) -> Report {
        match self {
            ValidationResult::Valid(data) => Report {
                is_valid: true,
                data: Some(data),
                errors: None,
            },
            ValidationResult::Invalid(errors) => Report {
                is_valid: false,
                data: None,
                errors: Some(errors),
            },
        }
    }
}

impl From<ValidationResult> for Report {
    fn from(result: ValidationResult) -> Self {
        result.into_report()
    }
}

/// Wire form of a validation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Result for one row of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowReport {
    /// Zero-based position in the input
    pub row: usize,
    #[serde(flatten)]
    pub report: Report,
}

/// Results for a batch of records validated against one schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub schema: String,
    pub accepted: usize,
    pub rejected: usize,
    pub rows: Vec<RowReport>,
}

impl BatchReport {
    pub(crate) fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            accepted: 0,
            rejected: 0,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: usize, result: ValidationResult) {
        if result.is_valid() {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
        self.rows.push(RowReport {
            row,
            report: result.into_report(),
        });
    }

    /// Whether every row was accepted
    pub fn all_valid(&self) -> bool {
        self.rejected == 0
    }

    /// Accepted records, in input order
    pub fn accepted_records(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.rows.iter().filter_map(|r| r.report.data.as_ref())
    }
}
