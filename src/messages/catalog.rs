//! Locale tags and per-locale message catalogs.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::keys;

/// Supported message languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Arabic
    #[default]
    Ar,
    /// English
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unrecognized locale tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}' (expected 'ar' or 'en')")]
pub struct ParseLocaleError(String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Locale::Ar),
            "en" => Ok(Locale::En),
            other => Err(ParseLocaleError(other.to_string())),
        }
    }
}

/// Message templates for one locale
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    entries: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

impl Catalog {
    /// Built-in catalog for `locale`
    pub fn for_locale(locale: Locale) -> Self {
        let table = match locale {
            Locale::Ar => ARABIC,
            Locale::En => ENGLISH,
        };
        let entries = table
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { locale, entries }
    }

    /// Catalog with no entries; every key renders verbatim
    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            entries: HashMap::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Adds or replaces one template
    pub fn with_entry(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.entries.insert(key.into(), template.into());
        self
    }

    /// Adds or replaces many templates
    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Whether `key` has a template
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the template for `key`, or `key` itself
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Resolves `key` and substitutes `{name}` placeholders from `args`
    pub fn render(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut out = self.resolve(key).to_string();
        for (name, value) in args {
            let placeholder = format!("{{{}}}", name);
            if out.contains(&placeholder) {
                out = out.replace(&placeholder, value);
            }
        }
        out
    }
}

const ARABIC: &[(&str, &str)] = &[
    (keys::REQUIRED, "هذا الحقل مطلوب"),
    (keys::INVALID_TYPE, "نوع القيمة غير صحيح: المتوقع {expected}"),
    (keys::INVALID_ENUM, "القيمة غير صحيحة"),
    // login
    ("login.username.min", "اسم المستخدم يجب أن يكون على الأقل 3 أحرف"),
    ("login.username.max", "اسم المستخدم يجب أن لا يتجاوز 20 حرف"),
    ("login.username.pattern", "اسم المستخدم يجب أن يحتوي على أحرف وأرقام فقط"),
    ("login.password.min", "كلمة المرور يجب أن تكون على الأقل 6 أحرف"),
    ("login.password.max", "كلمة المرور طويلة جداً"),
    ("login.role.invalid", "نوع المستخدم غير صحيح"),
    // student
    ("student.name.min", "اسم الطالب يجب أن يكون على الأقل حرفين"),
    ("student.name.max", "اسم الطالب طويل جداً"),
    ("student.name.pattern", "اسم الطالب يجب أن يكون باللغة العربية"),
    ("student.studentId.pattern", "رقم الطالب يجب أن يكون بصيغة A001"),
    ("student.className.min", "الصف مطلوب"),
    ("student.className.max", "اسم الصف طويل جداً"),
    ("student.section.min", "القسم مطلوب"),
    ("student.section.max", "اسم القسم طويل جداً"),
    ("student.phoneNumber.pattern", "رقم الهاتف يجب أن يبدأ بـ 05 ويحتوي على 10 أرقام"),
    ("student.parentName.min", "اسم ولي الأمر يجب أن يكون على الأقل حرفين"),
    ("student.parentName.max", "اسم ولي الأمر طويل جداً"),
    // grade
    ("grade.subject.min", "المادة مطلوبة"),
    ("grade.grade.min", "الدرجة لا يمكن أن تكون أقل من 0"),
    ("grade.grade.max", "الدرجة لا يمكن أن تتجاوز 100"),
    ("grade.examType.invalid", "نوع الاختبار غير صحيح"),
    (keys::INVALID_DATE, "تاريخ غير صحيح"),
    // behaviorNote
    ("behaviorNote.note.min", "الملاحظة يجب أن تكون على الأقل 10 أحرف"),
    ("behaviorNote.note.max", "الملاحظة طويلة جداً"),
    ("behaviorNote.type.invalid", "نوع الملاحظة غير صحيح"),
    // excelUpload
    ("excelUpload.file.size", "حجم الملف يجب أن لا يتجاوز 5 ميجابايت"),
    ("excelUpload.file.type", "نوع الملف يجب أن يكون Excel"),
    ("excelUpload.type.invalid", "نوع البيانات غير صحيح"),
];

const ENGLISH: &[(&str, &str)] = &[
    (keys::REQUIRED, "{field} is required"),
    (keys::INVALID_TYPE, "Expected {expected}, received {actual}"),
    (keys::INVALID_ENUM, "{field} must be one of: {expected}"),
    // login
    ("login.username.min", "Username must be at least 3 characters"),
    ("login.username.max", "Username must not exceed 20 characters"),
    ("login.username.pattern", "Username may only contain letters, digits and underscores"),
    ("login.password.min", "Password must be at least 6 characters"),
    ("login.password.max", "Password is too long"),
    ("login.role.invalid", "Invalid user role"),
    // student
    ("student.name.min", "Student name must be at least 2 characters"),
    ("student.name.max", "Student name is too long"),
    ("student.name.pattern", "Student name must be written in Arabic"),
    ("student.studentId.pattern", "Student ID must look like A001"),
    ("student.className.min", "Class is required"),
    ("student.className.max", "Class name is too long"),
    ("student.section.min", "Section is required"),
    ("student.section.max", "Section name is too long"),
    ("student.phoneNumber.pattern", "Phone number must start with 05 and have 10 digits"),
    ("student.parentName.min", "Parent name must be at least 2 characters"),
    ("student.parentName.max", "Parent name is too long"),
    // grade
    ("grade.subject.min", "Subject is required"),
    ("grade.grade.min", "Grade cannot be less than 0"),
    ("grade.grade.max", "Grade cannot exceed 100"),
    ("grade.examType.invalid", "Invalid exam type"),
    (keys::INVALID_DATE, "Invalid date"),
    // behaviorNote
    ("behaviorNote.note.min", "Note must be at least 10 characters"),
    ("behaviorNote.note.max", "Note is too long"),
    ("behaviorNote.type.invalid", "Invalid note type"),
    // excelUpload
    ("excelUpload.file.size", "File size must not exceed 5MB"),
    ("excelUpload.file.type", "File must be an Excel spreadsheet"),
    ("excelUpload.type.invalid", "Invalid data type"),
];
