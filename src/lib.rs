//! schoolval - strict, declarative validation for school management records
//!
//! A record (parsed JSON) is checked against a named schema and the
//! result is either the accepted, normalized record or a map from field
//! path to one localized message.
//!
//! ```
//! use schoolval::{Engine, Locale};
//! use serde_json::json;
//!
//! let engine = Engine::builtin(Locale::En).unwrap();
//! let result = engine
//!     .validate("login", &json!({"username": "parent1", "password": "123456", "role": "parent"}))
//!     .unwrap();
//! assert!(result.is_valid());
//! ```

pub mod cli;
pub mod engine;
pub mod messages;
pub mod observability;
pub mod schema;

pub use engine::Engine;
pub use messages::{Catalog, Locale};
pub use schema::{ConfigError, Report, Schema, SchemaRegistry, ValidationResult};
