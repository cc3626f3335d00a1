//! Payform: a declarative field-validation engine for payment forms
//!
//! Payform follows Stillwater's "pure core, imperative shell" philosophy.
//! Validators, the transition reducer and the visibility policy are pure
//! functions; the [`ValidationEngine`] is the thin stateful shell that owns
//! one form's state and applies transitions to it.
//!
//! # Core Concepts
//!
//! - **Validators**: two-stage `(rule config) -> (value) -> error` functions,
//!   built-in or supplied per form
//! - **Configuration**: fields with ordered rules, optionally derived from
//!   the current values for cross-field rules
//! - **Transitions**: `change`, `blur`, `submit` and `validate`, the only way
//!   state changes
//! - **Visibility**: `always`, `blur` or `submit` decides which computed
//!   errors the user sees
//!
//! # Example
//!
//! ```rust
//! use payform::builder::FormConfigBuilder;
//! use payform::config::ShowErrors;
//! use payform::ValidationEngine;
//!
//! let config = FormConfigBuilder::new()
//!     .field_with("Name", |f| {
//!         f.required("Please provide a name as it appears on your card")
//!             .min_length(3, "Please provide a proper name")
//!     })
//!     .show_errors(ShowErrors::Submit)
//!     .build();
//!
//! let mut engine = ValidationEngine::new(config).unwrap();
//! engine.field("Name").on_change("tg");
//! assert!(engine.errors().is_empty());
//!
//! engine.form().on_submit();
//! assert_eq!(
//!     engine.errors()["Name"].as_deref(),
//!     Some("Please provide a proper name")
//! );
//! ```

pub mod builder;
pub mod card;
pub mod config;
pub mod core;
pub mod engine;
pub mod payment;
pub mod schema;

// Re-export commonly used types
pub use config::{ConfigSource, FormConfig, ShowErrors};
pub use self::core::{ErrorMap, FieldConfig, FieldValues, RuleConfig, Validator, ValidatorRegistry};
pub use engine::{EngineState, FieldOverrides, SubmitSnapshot, Transition, ValidationEngine};
pub use schema::{ConfigError, SchemaViolation};
