//! Validator library.
//!
//! This module contains the pure validation core:
//! - Rule and field configuration types
//! - The two-stage validator contract
//! - Built-in validators
//! - The immutable per-engine validator registry
//!
//! Nothing in here holds state; the engine owns state and calls into this
//! module to compute errors.

pub mod builtin;
mod registry;
mod rule;
mod validator;

use indexmap::IndexMap;

pub use registry::ValidatorRegistry;
pub use rule::{FieldConfig, RuleConfig, CARD_TYPE, INITIAL_VALUE};
pub use validator::{Check, Validator};

/// Current value of every field, keyed by field name.
pub type FieldValues = IndexMap<String, String>;

/// Error of every field, keyed by field name. `None` means the field passes.
pub type ErrorMap = IndexMap<String, Option<String>>;
