//! Localized validation messages
//!
//! Schemas refer to messages by key. A [`Catalog`] maps keys to templates
//! for one [`Locale`]; templates may use `{field}`, `{expected}` and
//! `{actual}` placeholders. A key with no catalog entry renders verbatim,
//! so schemas loaded from files can carry literal text.

mod catalog;

pub use catalog::{Catalog, Locale, ParseLocaleError};

/// Message keys used by the validator itself
pub mod keys {
    /// Required field is absent
    pub const REQUIRED: &str = "required";
    /// Value kind does not match the rule kind
    pub const INVALID_TYPE: &str = "invalid_type";
    /// Value not in the enum's value set
    pub const INVALID_ENUM: &str = "invalid_enum";
    /// Date field holds a string that does not parse as a date
    pub const INVALID_DATE: &str = "date.invalid";
}
