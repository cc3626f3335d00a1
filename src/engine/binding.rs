//! Field and form bindings handed to the presentation layer.

use super::machine::ValidationEngine;
use crate::core::{ErrorMap, FieldValues};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only snapshot passed to the submit callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSnapshot {
    pub session_id: Uuid,
    pub values: FieldValues,
    /// Full, unfiltered errors.
    pub errors: ErrorMap,
    pub blurred: IndexMap<String, bool>,
    pub submitted: bool,
    pub is_form_valid: bool,
}

/// Caller hooks and overrides for one field binding.
///
/// # Example
///
/// ```rust
/// use payform::engine::FieldOverrides;
///
/// let mut seen = Vec::new();
/// let overrides = FieldOverrides::new()
///     .rule(|raw| raw.chars().all(|c| c.is_ascii_digit()))
///     .on_change(|raw| seen.push(raw.to_string()));
/// # drop(overrides);
/// ```
#[derive(Default)]
pub struct FieldOverrides<'a> {
    value: Option<FieldValues>,
    name: Option<String>,
    rule: Option<Box<dyn Fn(&str) -> bool + 'a>>,
    on_change: Option<Box<dyn FnMut(&str) + 'a>>,
    on_blur: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> FieldOverrides<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display `value` for `key` instead of the tracked raw value.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.value
            .get_or_insert_with(FieldValues::new)
            .insert(key.into(), value.into());
        self
    }

    /// Name reported to the presentation layer.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Input-admission gate: changes it rejects never reach the engine.
    pub fn rule<F>(mut self, admit: F) -> Self
    where
        F: Fn(&str) -> bool + 'a,
    {
        self.rule = Some(Box::new(admit));
        self
    }

    /// Called with the raw value after every change to a known field.
    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str) + 'a,
    {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Called after every blur.
    pub fn on_blur<F>(mut self, handler: F) -> Self
    where
        F: FnMut() + 'a,
    {
        self.on_blur = Some(Box::new(handler));
        self
    }

    fn admits(&self, raw: &str) -> bool {
        self.rule.as_ref().is_none_or(|admit| admit(raw))
    }
}

/// Value, change handler and blur handler scoped to one field.
pub struct FieldBinding<'a> {
    engine: &'a mut ValidationEngine,
    field: String,
    overrides: FieldOverrides<'a>,
}

impl<'a> FieldBinding<'a> {
    pub(crate) fn new(
        engine: &'a mut ValidationEngine,
        field: String,
        overrides: FieldOverrides<'a>,
    ) -> Self {
        Self {
            engine,
            field,
            overrides,
        }
    }

    pub fn name(&self) -> &str {
        self.overrides.name.as_deref().unwrap_or(&self.field)
    }

    /// The value to display: the override for this field when one was
    /// given, otherwise the tracked value.
    pub fn value(&self) -> &str {
        self.overrides
            .value
            .as_ref()
            .and_then(|values| values.get(&self.field))
            .map(String::as_str)
            .or_else(|| self.engine.state().value(&self.field))
            .unwrap_or_default()
    }

    /// Feed a new raw value.
    ///
    /// Ignored entirely for fields that are not configured. Otherwise the
    /// change is applied when the admission rule (if any) accepts it, and the
    /// `on_change` hook runs either way.
    pub fn on_change(&mut self, raw: &str) -> &mut Self {
        if !self.engine.config().has_field(&self.field) {
            return self;
        }

        if self.overrides.admits(raw) {
            self.engine.change(&self.field, raw);
        }
        if let Some(handler) = self.overrides.on_change.as_mut() {
            handler(raw);
        }
        self
    }

    /// Mark the field as having lost focus.
    pub fn on_blur(&mut self) -> &mut Self {
        self.engine.blur(&self.field);
        if let Some(handler) = self.overrides.on_blur.as_mut() {
            handler();
        }
        self
    }
}

/// Form-level submit binding.
pub struct FormBinding<'a> {
    engine: &'a mut ValidationEngine,
}

impl<'a> FormBinding<'a> {
    pub(crate) fn new(engine: &'a mut ValidationEngine) -> Self {
        Self { engine }
    }

    /// Submit the form: mark it submitted, run the configured callback with
    /// the resulting snapshot, and return that snapshot.
    pub fn on_submit(self) -> SubmitSnapshot {
        self.engine.submit()
    }
}
