//! Predefined schemas for the school records.

use crate::messages::keys;

use super::errors::{ConfigError, ConfigResult};
use super::types::{FieldDef, FieldRule, Schema};

pub const LOGIN: &str = "login";
pub const STUDENT: &str = "student";
pub const GRADE: &str = "grade";
pub const BEHAVIOR_NOTE: &str = "behaviorNote";
pub const EXCEL_UPLOAD: &str = "excelUpload";
pub const API_RESPONSE: &str = "apiResponse";

/// Upload size ceiling: 5 MiB
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Spreadsheet MIME types accepted for uploads (xlsx, xls)
pub const EXCEL_MIME_TYPES: [&str; 2] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// Returns every predefined schema.
pub fn all() -> ConfigResult<Vec<Schema>> {
    Ok(vec![
        login()?,
        student()?,
        grade(),
        behavior_note(),
        excel_upload(),
        api_response(),
    ])
}

pub fn login() -> ConfigResult<Schema> {
    Ok(Schema::new(
        LOGIN,
        vec![
            FieldDef::new(
                "username",
                pattern(
                    LOGIN,
                    "username",
                    FieldRule::string()
                        .min_length(3, "login.username.min")
                        .max_length(20, "login.username.max"),
                    r"[a-zA-Z0-9_]+",
                    "login.username.pattern",
                )?,
            ),
            FieldDef::new(
                "password",
                FieldRule::string()
                    .min_length(6, "login.password.min")
                    .max_length(50, "login.password.max"),
            ),
            FieldDef::new(
                "role",
                FieldRule::one_of(["parent", "teacher", "admin"]).message("login.role.invalid"),
            ),
        ],
    )
    .with_description("Login credentials"))
}

pub fn student() -> ConfigResult<Schema> {
    Ok(Schema::new(
        STUDENT,
        vec![
            FieldDef::new(
                "name",
                pattern(
                    STUDENT,
                    "name",
                    FieldRule::string()
                        .min_length(2, "student.name.min")
                        .max_length(100, "student.name.max"),
                    r"[\x{0600}-\x{06FF}\s]+",
                    "student.name.pattern",
                )?,
            ),
            FieldDef::new(
                "studentId",
                pattern(
                    STUDENT,
                    "studentId",
                    FieldRule::string(),
                    r"[A-Z][0-9]{3}",
                    "student.studentId.pattern",
                )?,
            ),
            FieldDef::new(
                "className",
                FieldRule::string()
                    .min_length(1, "student.className.min")
                    .max_length(10, "student.className.max"),
            ),
            FieldDef::new(
                "section",
                FieldRule::string()
                    .min_length(1, "student.section.min")
                    .max_length(20, "student.section.max"),
            ),
            FieldDef::new(
                "phoneNumber",
                pattern(
                    STUDENT,
                    "phoneNumber",
                    FieldRule::string(),
                    r"05[0-9]{8}",
                    "student.phoneNumber.pattern",
                )?,
            ),
            FieldDef::new(
                "parentName",
                FieldRule::string()
                    .min_length(2, "student.parentName.min")
                    .max_length(100, "student.parentName.max"),
            ),
        ],
    )
    .with_description("Student record"))
}

pub fn grade() -> Schema {
    Schema::new(
        GRADE,
        vec![
            FieldDef::new("subject", FieldRule::string().min_length(1, "grade.subject.min")),
            FieldDef::new(
                "grade",
                FieldRule::number()
                    .min(0.0, "grade.grade.min")
                    .max(100.0, "grade.grade.max"),
            ),
            FieldDef::new(
                "examType",
                FieldRule::one_of(["quiz", "midterm", "final", "assignment"])
                    .message("grade.examType.invalid"),
            ),
            FieldDef::new("date", FieldRule::date().parseable_date(keys::INVALID_DATE)),
        ],
    )
    .with_description("Grade entry")
}

pub fn behavior_note() -> Schema {
    Schema::new(
        BEHAVIOR_NOTE,
        vec![
            FieldDef::new(
                "note",
                FieldRule::string()
                    .min_length(10, "behaviorNote.note.min")
                    .max_length(500, "behaviorNote.note.max"),
            ),
            FieldDef::new(
                "type",
                FieldRule::one_of(["positive", "negative", "neutral"])
                    .message("behaviorNote.type.invalid"),
            ),
            FieldDef::new("date", FieldRule::date().parseable_date(keys::INVALID_DATE)),
        ],
    )
    .with_description("Behavior note")
}

pub fn excel_upload() -> Schema {
    Schema::new(
        EXCEL_UPLOAD,
        vec![
            FieldDef::new(
                "file",
                FieldRule::file()
                    .max_file_size(MAX_UPLOAD_BYTES, "excelUpload.file.size")
                    .mime_types(EXCEL_MIME_TYPES, "excelUpload.file.type"),
            ),
            FieldDef::new(
                "type",
                FieldRule::one_of(["students", "grades", "attendance"])
                    .message("excelUpload.type.invalid"),
            ),
        ],
    )
    .with_description("Spreadsheet upload descriptor")
}

pub fn api_response() -> Schema {
    Schema::new(
        API_RESPONSE,
        vec![
            FieldDef::new("success", FieldRule::boolean()),
            FieldDef::new("message", FieldRule::string().optional()),
            FieldDef::new("data", FieldRule::any().optional()),
            FieldDef::new("error", FieldRule::string().optional()),
        ],
    )
    .with_description("Generic API response envelope")
}

fn pattern(
    schema: &str,
    field: &str,
    rule: FieldRule,
    source: &str,
    message: &str,
) -> ConfigResult<FieldRule> {
    rule.pattern(source, message)
        .map_err(|e| ConfigError::MalformedRule {
            schema: schema.to_string(),
            field: field.to_string(),
            reason: format!("invalid pattern: {}", e),
        })
}
