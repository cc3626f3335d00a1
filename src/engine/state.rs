//! Engine state snapshot.

use crate::config::FormConfig;
use crate::core::{ErrorMap, FieldValues, ValidatorRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The single source of truth for one form session.
///
/// Snapshots are immutable values; transitions produce new snapshots through
/// [`reduce`](super::reduce). `values`, `errors` and `blurred` share the key
/// set of the configured fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub(crate) values: FieldValues,
    pub(crate) errors: ErrorMap,
    pub(crate) blurred: IndexMap<String, bool>,
    pub(crate) submitted: bool,
}

impl EngineState {
    /// Fresh state for a config: initial values (or `""`), nothing blurred,
    /// not submitted, and errors already computed for the initial values.
    pub fn initial(config: &FormConfig, registry: &ValidatorRegistry) -> Self {
        let values: FieldValues = config
            .fields
            .iter()
            .map(|(name, field)| {
                let initial = field.initial_value().unwrap_or_default().to_string();
                (name.clone(), initial)
            })
            .collect();
        let blurred = config
            .fields
            .keys()
            .map(|name| (name.clone(), false))
            .collect();
        let errors = registry.validate_fields(&values, &config.fields);

        Self {
            values,
            errors,
            blurred,
            submitted: false,
        }
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Full, unfiltered error map.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn blurred(&self) -> &IndexMap<String, bool> {
        &self.blurred
    }

    pub fn is_blurred(&self, field: &str) -> bool {
        self.blurred.get(field).copied().unwrap_or(false)
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// True when no field has an error, visible or not.
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Option::is_none)
    }

    /// True when every field still holds the empty string.
    pub fn is_pristine(&self) -> bool {
        self.values.values().all(String::is_empty)
    }
}
