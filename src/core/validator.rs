//! The two-stage validator contract.
//!
//! A validator is a factory: given a rule configuration it produces a check,
//! and the check maps a field value to an optional error message. Both stages
//! are pure, so a check can be rebuilt and re-run at any time.

use super::rule::RuleConfig;
use std::fmt;
use std::sync::Arc;

/// A bound per-value check produced by a [`Validator`].
///
/// Returns `Some(message)` when the value fails, `None` when it passes. The
/// value is `None` when the field has no entry at all.
pub type Check = Box<dyn Fn(Option<&str>) -> Option<String> + Send + Sync>;

/// Named-rule implementation: `(rule config) -> (value) -> error`.
///
/// # Example
///
/// ```rust
/// use payform::core::{RuleConfig, Validator};
///
/// let no_spaces = Validator::from_fn(|rule, value| {
///     value
///         .filter(|v| v.contains(' '))
///         .map(|_| rule.message().to_string())
/// });
///
/// let rule = RuleConfig::new("Spaces are not allowed");
/// assert_eq!(no_spaces.check(&rule, Some("a b")), Some("Spaces are not allowed".to_string()));
/// assert_eq!(no_spaces.check(&rule, Some("ab")), None);
/// ```
#[derive(Clone)]
pub struct Validator {
    factory: Arc<dyn Fn(&RuleConfig) -> Check + Send + Sync>,
}

impl Validator {
    /// Create a validator from a factory that binds a rule into a check.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&RuleConfig) -> Check + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Create a validator from a single function of rule and value.
    pub fn from_fn<F>(check: F) -> Self
    where
        F: Fn(&RuleConfig, Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        let check = Arc::new(check);
        Self::new(move |rule| {
            let rule = rule.clone();
            let check = Arc::clone(&check);
            Box::new(move |value| check(&rule, value))
        })
    }

    /// Bind a rule configuration, producing the per-value check.
    pub fn bind(&self, rule: &RuleConfig) -> Check {
        (self.factory)(rule)
    }

    /// Bind and run in one step.
    pub fn check(&self, rule: &RuleConfig, value: Option<&str>) -> Option<String> {
        self.bind(rule)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}
