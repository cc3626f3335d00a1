//! Validation engine: state, transitions and bindings.
//!
//! This module is the stateful shell around the pure validator library.
//!
//! # Key Concepts
//!
//! - **State**: one immutable [`EngineState`] snapshot per session
//! - **Transitions**: `change`, `blur`, `submit` and the internal `validate`,
//!   applied by the pure [`reduce`] function
//! - **Visibility**: [`visible_errors`] filters the full error map by policy
//! - **Bindings**: [`FieldBinding`] and [`FormBinding`] connect a
//!   presentation layer to the engine

mod binding;
mod machine;
mod policy;
mod state;
mod transition;

pub use binding::{FieldBinding, FieldOverrides, FormBinding, SubmitSnapshot};
pub use machine::ValidationEngine;
pub use policy::visible_errors;
pub use state::EngineState;
pub use transition::{reduce, Transition};
