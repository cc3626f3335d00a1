//! Form configuration.
//!
//! A [`FormConfig`] declares the fields, their rules, extra validators, the
//! submit callback and the error-visibility policy. An engine is driven by a
//! [`ConfigSource`]: either a fixed config, or a pure resolver that derives
//! the config from the current field values so rules can depend on other
//! fields.

mod json;

use crate::core::{FieldConfig, FieldValues, Validator};
use crate::engine::SubmitSnapshot;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Callback invoked with the final snapshot when the form is submitted.
pub type SubmitHandler = Arc<dyn Fn(&SubmitSnapshot) + Send + Sync>;

/// Resolver deriving a config from the current field values.
pub type ConfigResolver = Arc<dyn Fn(&FieldValues) -> FormConfig + Send + Sync>;

/// When computed errors become visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowErrors {
    /// Every error is visible from the start.
    Always,
    /// An error is visible once its field has lost focus.
    Blur,
    /// Errors are hidden until the form is submitted.
    #[default]
    Submit,
}

impl ShowErrors {
    pub const NAMES: [&'static str; 3] = ["always", "blur", "submit"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Blur => "blur",
            Self::Submit => "submit",
        }
    }
}

/// Declarative configuration of one form.
#[derive(Clone, Default)]
pub struct FormConfig {
    /// Fields in display order.
    pub fields: IndexMap<String, FieldConfig>,
    /// Extra validators, merged over the built-ins.
    pub custom_validators: IndexMap<String, Validator>,
    pub on_submit: Option<SubmitHandler>,
    /// Visibility policy; unset behaves as [`ShowErrors::Submit`].
    pub show_errors: Option<ShowErrors>,
    /// Rule names with this prefix resolve to custom validators only.
    pub custom_prefix: Option<String>,
}

impl FormConfig {
    pub fn builder() -> crate::builder::FormConfigBuilder {
        crate::builder::FormConfigBuilder::new()
    }

    /// The effective visibility policy.
    pub fn policy(&self) -> ShowErrors {
        self.show_errors.unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

impl fmt::Debug for FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("fields", &self.fields)
            .field(
                "custom_validators",
                &self.custom_validators.keys().collect::<Vec<_>>(),
            )
            .field("on_submit", &self.on_submit.is_some())
            .field("show_errors", &self.show_errors)
            .field("custom_prefix", &self.custom_prefix)
            .finish()
    }
}

/// Where an engine gets its configuration from.
#[derive(Clone)]
pub enum ConfigSource {
    Static(FormConfig),
    /// Re-resolved against the current values on every validation pass.
    /// Must be pure and must accept empty and partial snapshots.
    Resolver(ConfigResolver),
}

impl ConfigSource {
    pub fn resolver<F>(resolve: F) -> Self
    where
        F: Fn(&FieldValues) -> FormConfig + Send + Sync + 'static,
    {
        Self::Resolver(Arc::new(resolve))
    }

    /// Produce the config for the given snapshot.
    pub fn resolve(&self, values: &FieldValues) -> FormConfig {
        match self {
            Self::Static(config) => config.clone(),
            Self::Resolver(resolve) => resolve(values),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Resolver(_))
    }
}

impl From<FormConfig> for ConfigSource {
    fn from(config: FormConfig) -> Self {
        Self::Static(config)
    }
}

impl fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(config) => f.debug_tuple("Static").field(config).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_policy_defaults_to_submit() {
        let config = FormConfig::default();
        assert_eq!(config.policy(), ShowErrors::Submit);
    }

    #[test]
    fn show_errors_uses_lowercase_names() {
        for policy in [ShowErrors::Always, ShowErrors::Blur, ShowErrors::Submit] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy.name()));
            assert!(ShowErrors::NAMES.contains(&policy.name()));
        }
    }

    #[test]
    fn resolver_sees_current_values() {
        let source = ConfigSource::resolver(|values: &FieldValues| {
            let mut config = FormConfig::default();
            for name in values.keys() {
                config.fields.insert(name.clone(), FieldConfig::new());
            }
            config
        });

        assert!(source.is_dynamic());
        assert!(source.resolve(&FieldValues::new()).fields.is_empty());

        let mut values = FieldValues::new();
        values.insert("a".to_string(), "1".to_string());
        assert!(source.resolve(&values).has_field("a"));
    }

    #[test]
    fn static_source_ignores_values() {
        let mut config = FormConfig::default();
        config.fields.insert("x".to_string(), FieldConfig::new());
        let source = ConfigSource::from(config);

        let mut values = FieldValues::new();
        values.insert("y".to_string(), String::new());
        let resolved = source.resolve(&values);
        assert!(resolved.has_field("x"));
        assert!(!resolved.has_field("y"));
    }
}
