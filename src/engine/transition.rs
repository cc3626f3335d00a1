//! The engine's transitions and their reducer.

use super::state::EngineState;
use crate::core::{ErrorMap, FieldValues};
use serde::{Deserialize, Serialize};

/// One atomic, named state change.
///
/// These four kinds are the only way engine state changes. In serialized
/// form a transition is `{"type": ..., "payload": ...}`; an unrecognized
/// `type` fails to decode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Transition {
    /// Merge new raw values into `values`.
    Change(FieldValues),
    /// Mark a field as having lost focus.
    Blur(String),
    /// Mark the form as submitted.
    Submit,
    /// Replace the error map. Issued by the engine after every `Change`.
    /// Fields new to the error map start out not blurred.
    Validate(ErrorMap),
}

impl Transition {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Change(_) => "change",
            Self::Blur(_) => "blur",
            Self::Submit => "submit",
            Self::Validate(_) => "validate",
        }
    }
}

/// Apply a transition, returning the next snapshot.
///
/// This is a pure function: the input snapshot is left unchanged.
///
/// # Example
///
/// ```rust
/// use payform::engine::{reduce, EngineState, Transition};
///
/// let state = EngineState::default();
/// let next = reduce(&state, Transition::Submit);
///
/// assert!(next.submitted());
/// assert!(!state.submitted());
/// ```
pub fn reduce(state: &EngineState, transition: Transition) -> EngineState {
    match transition {
        Transition::Change(payload) => {
            let mut values = state.values.clone();
            values.extend(payload);
            EngineState {
                values,
                ..state.clone()
            }
        }
        Transition::Blur(field) => {
            let mut blurred = state.blurred.clone();
            blurred.insert(field, true);
            EngineState {
                blurred,
                ..state.clone()
            }
        }
        Transition::Submit => EngineState {
            submitted: true,
            ..state.clone()
        },
        Transition::Validate(errors) => {
            let mut blurred = state.blurred.clone();
            for name in errors.keys() {
                blurred.entry(name.clone()).or_insert(false);
            }
            EngineState {
                errors,
                blurred,
                ..state.clone()
            }
        }
    }
}
