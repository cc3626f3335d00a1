//! Configuration schema checks.
//!
//! This module guards engine setup against malformed configurations. It uses
//! Stillwater's `Validation` type to report every violation in one pass
//! instead of stopping at the first one.
//!
//! The checks are a development aid: [`enabled`] is false in release builds,
//! where the engine skips them and malformed configs behave unpredictably.
//!
//! # Example
//!
//! ```rust
//! use payform::schema::{check_document, SchemaViolation};
//! use serde_json::json;
//!
//! let err = check_document(&json!({ "fields": [], "showErrors": "never" })).unwrap_err();
//! assert_eq!(err.violations().len(), 2);
//! ```

mod rules;
mod violations;

pub use rules::{check_config, check_document};
pub use violations::{ConfigError, SchemaViolation};

/// Whether schema checks run in this build.
pub fn enabled() -> bool {
    cfg!(debug_assertions)
}
