//! Builder for form configurations.

use crate::builder::field::FieldConfigBuilder;
use crate::config::{FormConfig, ShowErrors};
use crate::core::{FieldConfig, Validator};
use crate::engine::SubmitSnapshot;
use std::sync::Arc;

/// Builder for a [`FormConfig`] with a fluent API.
#[derive(Default)]
pub struct FormConfigBuilder {
    config: FormConfig,
}

impl FormConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Fields keep the order they are added in.
    pub fn field(mut self, name: impl Into<String>, field: FieldConfig) -> Self {
        self.config.fields.insert(name.into(), field);
        self
    }

    /// Add a field configured through a [`FieldConfigBuilder`].
    pub fn field_with<F>(self, name: impl Into<String>, configure: F) -> Self
    where
        F: FnOnce(FieldConfigBuilder) -> FieldConfigBuilder,
    {
        let field = configure(FieldConfigBuilder::new()).build();
        self.field(name, field)
    }

    /// Register a custom validator under `name`.
    pub fn validator(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.config.custom_validators.insert(name.into(), validator);
        self
    }

    pub fn on_submit<F>(mut self, handler: F) -> Self
    where
        F: Fn(&SubmitSnapshot) + Send + Sync + 'static,
    {
        self.config.on_submit = Some(Arc::new(handler));
        self
    }

    pub fn show_errors(mut self, policy: ShowErrors) -> Self {
        self.config.show_errors = Some(policy);
        self
    }

    pub fn custom_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.custom_prefix = Some(prefix.into());
        self
    }

    pub fn build(self) -> FormConfig {
        self.config
    }
}

impl From<FormConfig> for FormConfigBuilder {
    fn from(config: FormConfig) -> Self {
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn builds_complete_config() {
        let config = FormConfigBuilder::new()
            .field_with("Name", |f| f.required("Please provide a name"))
            .field("CVC", FieldConfig::new().with_rule("checkCvc", "bad cvc"))
            .validator("checkCvc", Validator::from_fn(|_, _| None))
            .show_errors(ShowErrors::Blur)
            .custom_prefix("check")
            .build();

        let names: Vec<&String> = config.fields.keys().collect();
        assert_eq!(names, vec!["Name", "CVC"]);
        assert!(config.custom_validators.contains_key("checkCvc"));
        assert_eq!(config.policy(), ShowErrors::Blur);
        assert_eq!(config.custom_prefix.as_deref(), Some("check"));
    }

    #[test]
    fn extends_an_existing_config() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let base = FormConfigBuilder::new()
            .field_with("Name", |f| f.required("required"))
            .build();
        let config = FormConfigBuilder::from(base)
            .on_submit(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        assert!(config.has_field("Name"));
        assert!(config.on_submit.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
