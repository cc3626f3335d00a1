//! Error-visibility policy.

use super::state::EngineState;
use crate::config::ShowErrors;
use crate::core::ErrorMap;

/// Errors the end user should currently see.
///
/// - `Always`: the full error map.
/// - `Blur`: entries for blurred fields only. A blurred field that is no
///   longer configured has no entry.
/// - `Submit`: the full map once submitted, otherwise nothing.
pub fn visible_errors(state: &EngineState, policy: ShowErrors) -> ErrorMap {
    match policy {
        ShowErrors::Always => state.errors.clone(),
        ShowErrors::Blur => state
            .errors
            .iter()
            .filter(|(name, _)| state.is_blurred(name))
            .map(|(name, error)| (name.clone(), error.clone()))
            .collect(),
        ShowErrors::Submit if state.submitted => state.errors.clone(),
        ShowErrors::Submit => ErrorMap::new(),
    }
}
