//! Builder for field configurations.

use crate::core::builtin::{IS_CARD_NUMBER_CORRECT, IS_LENGTH, IS_MIN_LENGTH, IS_NUMBER, IS_REQUIRED};
use crate::core::{FieldConfig, RuleConfig, CARD_TYPE};

/// Builder for a [`FieldConfig`] with a fluent API.
///
/// Rules are evaluated in the order they are added.
#[derive(Default)]
pub struct FieldConfigBuilder {
    field: FieldConfig,
}

impl FieldConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting value of the field.
    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.field = self.field.with_initial_value(value);
        self
    }

    /// Add a rule by validator name.
    pub fn rule(mut self, name: impl Into<String>, rule: impl Into<RuleConfig>) -> Self {
        self.field = self.field.with_rule(name, rule);
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(IS_REQUIRED, RuleConfig::new(message))
    }

    pub fn number(self, message: impl Into<String>) -> Self {
        self.rule(IS_NUMBER, RuleConfig::new(message))
    }

    pub fn length(self, length: usize, message: impl Into<String>) -> Self {
        self.rule(IS_LENGTH, RuleConfig::new(message).with_param("length", length))
    }

    pub fn min_length(self, length: usize, message: impl Into<String>) -> Self {
        self.rule(
            IS_MIN_LENGTH,
            RuleConfig::new(message).with_param("length", length),
        )
    }

    /// Add a card-number pattern rule. `card_type` is a card kind name
    /// (`amex`, `visa`, `unknown`); without one the rule always passes, and
    /// any other name makes it always fail.
    pub fn card_number(self, card_type: Option<&str>, message: impl Into<String>) -> Self {
        let rule = RuleConfig::new(message);
        let rule = match card_type {
            Some(kind) => rule.with_param(CARD_TYPE, kind),
            None => rule,
        };
        self.rule(IS_CARD_NUMBER_CORRECT, rule)
    }

    pub fn build(self) -> FieldConfig {
        self.field
    }
}
