//! Per-engine validator registry and field validation.
//!
//! The registry is built once when an engine is created: built-ins plus the
//! caller's custom validators, merged into one namespace where custom names
//! win. It is never mutated afterwards, so engines cannot interfere with each
//! other.

use super::builtin::{builtin, BUILTIN_NAMES};
use super::rule::FieldConfig;
use super::validator::Validator;
use super::{ErrorMap, FieldValues};
use indexmap::IndexMap;
use tracing::{trace, warn};

/// Immutable lookup table from rule name to validator.
#[derive(Clone, Debug)]
pub struct ValidatorRegistry {
    builtins: IndexMap<String, Validator>,
    custom: IndexMap<String, Validator>,
    custom_prefix: Option<String>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ValidatorRegistry {
    /// Registry holding only the built-in validators.
    pub fn builtin() -> Self {
        let builtins = BUILTIN_NAMES
            .iter()
            .filter_map(|name| builtin(name).map(|v| (name.to_string(), v)))
            .collect();

        Self {
            builtins,
            custom: IndexMap::new(),
            custom_prefix: None,
        }
    }

    /// Registry with the built-ins plus `custom`.
    ///
    /// When `custom_prefix` is set, rule names starting with it are looked up
    /// among the custom validators only.
    pub fn with_custom(custom: &IndexMap<String, Validator>, custom_prefix: Option<&str>) -> Self {
        Self {
            custom: custom.clone(),
            custom_prefix: custom_prefix.map(str::to_string),
            ..Self::builtin()
        }
    }

    /// Resolve a rule name to its validator.
    pub fn get(&self, name: &str) -> Option<&Validator> {
        let prefixed = self
            .custom_prefix
            .as_deref()
            .is_some_and(|prefix| name.starts_with(prefix));

        if prefixed {
            return self.custom.get(name);
        }
        self.custom.get(name).or_else(|| self.builtins.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All resolvable names: built-ins first, then custom validators.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builtins
            .keys()
            .filter(|name| !self.custom.contains_key(*name))
            .chain(self.custom.keys())
            .map(String::as_str)
    }

    /// Run a field's rules in declaration order and return the first error.
    ///
    /// Rules whose name does not resolve are skipped.
    pub fn validate_field(&self, value: Option<&str>, field: &FieldConfig) -> Option<String> {
        field.rules().find_map(|(name, rule)| match self.get(name) {
            Some(validator) => validator.check(rule, value),
            None => {
                warn!(rule = name, "skipping unknown validator");
                None
            }
        })
    }

    /// Validate every configured field against the current values.
    ///
    /// The result has exactly the key set of `fields`.
    pub fn validate_fields(
        &self,
        values: &FieldValues,
        fields: &IndexMap<String, FieldConfig>,
    ) -> ErrorMap {
        fields
            .iter()
            .map(|(name, field)| {
                let error = self.validate_field(values.get(name).map(String::as_str), field);
                trace!(field = %name, error = ?error, "validated field");
                (name.clone(), error)
            })
            .collect()
    }
}
