//! Builder API for ergonomic form configuration.
//!
//! This module provides fluent builders for declaring fields, their rules,
//! custom validators and the submit callback without writing out the
//! configuration maps by hand.
//!
//! # Example
//!
//! ```rust
//! use payform::builder::FormConfigBuilder;
//! use payform::config::ShowErrors;
//!
//! let config = FormConfigBuilder::new()
//!     .field_with("Name", |f| {
//!         f.required("Please provide a name as it appears on your card")
//!             .min_length(3, "Please provide a proper name")
//!     })
//!     .show_errors(ShowErrors::Submit)
//!     .build();
//!
//! assert!(config.has_field("Name"));
//! ```

mod field;
mod form;

pub use field::FieldConfigBuilder;
pub use form::FormConfigBuilder;
