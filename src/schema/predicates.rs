//! Value-level checks shared by the validator.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Returns true when `value` parses as a date or date-time.
///
/// Only parseability is checked: no range, timezone or calendar policy.
pub fn is_parseable_date(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(value, f).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(value, f).is_ok())
        || is_partial_date(value)
}

/// `YYYY` or `YYYY-MM`, read as the first day of that year or month.
fn is_partial_date(value: &str) -> bool {
    let padded = match value.len() {
        4 => format!("{}-01-01", value),
        7 => format!("{}-01", value),
        _ => return false,
    };
    value.as_bytes()[..4].iter().all(u8::is_ascii_digit)
        && NaiveDate::parse_from_str(&padded, "%Y-%m-%d").is_ok()
}

/// Returns the file descriptor fields if `value` has the descriptor shape:
/// an object with integer `size`, string `type`, and an optional string `name`.
pub fn file_descriptor(value: &Value) -> Option<(u64, &str)> {
    let obj: &Map<String, Value> = value.as_object()?;
    let size = obj.get("size")?.as_u64()?;
    let mime = obj.get("type")?.as_str()?;
    match obj.get("name") {
        None | Some(Value::String(_)) => Some((size, mime)),
        Some(_) => None,
    }
}

/// Checks a MIME type against an allow-list. `family/*` entries match any subtype.
pub fn is_mime_allowed(allowed: &[String], mime: &str) -> bool {
    allowed.iter().any(|entry| match entry.strip_suffix('*') {
        Some(prefix) if prefix.ends_with('/') => mime.starts_with(prefix),
        _ => entry == mime,
    })
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dates_accepted() {
        for d in [
            "2024-01-20",
            "2024/01/20",
            "01/20/2024",
            "2024-01-20T10:30",
            "2024-01-20T10:30:00",
            "2024-01-20T10:30:00.250",
            "2024-01-20 10:30:00",
            "2024-01-20T10:30:00Z",
            "2024-01-20T10:30:00+03:00",
            "Sat, 20 Jan 2024 10:30:00 +0000",
            "January 20, 2024",
            "20 January 2024",
            "2024-01",
            "2024",
        ] {
            assert!(is_parseable_date(d), "{} should parse", d);
        }
    }

    #[test]
    fn test_dates_rejected() {
        for d in [
            "",
            "   ",
            "not a date",
            "2024-13-01",
            "2024-02-30",
            "20/01",
            "2024-13",
            "24-01",
            "١٢٣٤",
            "Smarch 3, 2024",
        ] {
            assert!(!is_parseable_date(d), "{} should not parse", d);
        }
    }

    #[test]
    fn test_file_descriptor_shape() {
        let file = json!({"name": "a.xlsx", "size": 1024, "type": "application/vnd.ms-excel"});
        assert_eq!(file_descriptor(&file), Some((1024, "application/vnd.ms-excel")));

        let unnamed = json!({"size": 1, "type": "text/csv"});
        assert!(file_descriptor(&unnamed).is_some());

        assert!(file_descriptor(&json!({"size": -1, "type": "x"})).is_none());
        assert!(file_descriptor(&json!({"size": 1.5, "type": "x"})).is_none());
        assert!(file_descriptor(&json!({"size": 1})).is_none());
        assert!(file_descriptor(&json!({"size": 1, "type": "x", "name": 3})).is_none());
        assert!(file_descriptor(&json!("a.xlsx")).is_none());
    }

    #[test]
    fn test_mime_allow_list() {
        let allowed = vec!["image/*".to_string(), "application/pdf".to_string()];
        assert!(is_mime_allowed(&allowed, "image/png"));
        assert!(is_mime_allowed(&allowed, "application/pdf"));
        assert!(!is_mime_allowed(&allowed, "text/plain"));
        assert!(!is_mime_allowed(&allowed, "application/pdfx"));
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(1)), "number");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
        assert_eq!(json_type_name(&json!(true)), "boolean");
    }
}
