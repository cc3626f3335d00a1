//! Rule and field configuration types.
//!
//! A field carries an ordered set of named rules. Each rule is normalized to a
//! [`RuleConfig`]: a user-facing message plus optional rule-specific
//! parameters such as `length` or `cardType`.

use crate::card::CardKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved field key holding the starting value; never treated as a rule.
pub const INITIAL_VALUE: &str = "initialValue";

/// Rule parameter naming the card kind a card-dependent rule checks against.
pub const CARD_TYPE: &str = "cardType";

/// Configuration of one rule on one field.
///
/// In declarative configs a rule is either a bare message string or an object
/// with a `message` and extra parameters. Both forms deserialize into this
/// type.
///
/// # Example
///
/// ```rust
/// use payform::core::RuleConfig;
///
/// let rule: RuleConfig = serde_json::from_str(r#"{"message": "Too short", "length": 3}"#).unwrap();
/// assert_eq!(rule.message(), "Too short");
/// assert_eq!(rule.length(), Some(3));
///
/// let bare: RuleConfig = serde_json::from_str(r#""Required""#).unwrap();
/// assert_eq!(bare, RuleConfig::new("Required"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRule")]
pub struct RuleConfig {
    message: String,
    #[serde(flatten)]
    params: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRule {
    Message(String),
    Structured {
        message: String,
        #[serde(flatten)]
        params: Map<String, Value>,
    },
}

impl From<RawRule> for RuleConfig {
    fn from(raw: RawRule) -> Self {
        match raw {
            RawRule::Message(message) => Self::new(message),
            RawRule::Structured { message, params } => Self { message, params },
        }
    }
}

impl RuleConfig {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            params: Map::new(),
        }
    }

    /// Attach a rule-specific parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The error message returned when the rule fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// The `length` parameter, when present as an unsigned integer.
    pub fn length(&self) -> Option<usize> {
        self.param("length")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// The `cardType` parameter, when present and naming a known card kind.
    pub fn card_kind(&self) -> Option<CardKind> {
        self.param(CARD_TYPE)
            .and_then(Value::as_str)
            .and_then(CardKind::from_name)
    }

    /// The raw `cardType` parameter when it is present but names no known
    /// card kind.
    pub fn invalid_card_type(&self) -> Option<&Value> {
        self.param(CARD_TYPE).filter(|_| self.card_kind().is_none())
    }
}

impl From<&str> for RuleConfig {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for RuleConfig {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<RuleConfig> for Value {
    fn from(rule: RuleConfig) -> Self {
        if rule.params.is_empty() {
            return Value::String(rule.message);
        }
        let mut object = rule.params;
        object.insert("message".to_string(), Value::String(rule.message));
        Value::Object(object)
    }
}

/// Rules and starting value of one form field.
///
/// Rules keep their declaration order, which is also their evaluation order:
/// the first failing rule decides the field's error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, Value>",
    into = "IndexMap<String, Value>"
)]
pub struct FieldConfig {
    initial_value: Option<String>,
    rules: IndexMap<String, RuleConfig>,
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> crate::builder::FieldConfigBuilder {
        crate::builder::FieldConfigBuilder::new()
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    /// Append a rule. Re-declaring a name replaces the rule in place.
    pub fn with_rule(mut self, name: impl Into<String>, rule: impl Into<RuleConfig>) -> Self {
        self.rules.insert(name.into(), rule.into());
        self
    }

    pub fn initial_value(&self) -> Option<&str> {
        self.initial_value.as_deref()
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleConfig)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn rule(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.get(name)
    }
}

impl TryFrom<IndexMap<String, Value>> for FieldConfig {
    type Error = String;

    fn try_from(entries: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let mut field = FieldConfig::new();

        for (name, value) in entries {
            if name == INITIAL_VALUE {
                field.initial_value = match value {
                    Value::Null => None,
                    Value::String(text) => Some(text),
                    Value::Number(number) => Some(number.to_string()),
                    other => {
                        return Err(format!("`{INITIAL_VALUE}` must be a string, found {other}"))
                    }
                };
                continue;
            }

            let rule: RuleConfig = serde_json::from_value(value)
                .map_err(|e| format!("rule `{name}` is malformed: {e}"))?;
            field.rules.insert(name, rule);
        }

        Ok(field)
    }
}

impl From<FieldConfig> for IndexMap<String, Value> {
    fn from(field: FieldConfig) -> Self {
        let mut entries = IndexMap::new();
        if let Some(initial) = field.initial_value {
            entries.insert(INITIAL_VALUE.to_string(), Value::String(initial));
        }
        for (name, rule) in field.rules {
            entries.insert(name, Value::from(rule));
        }
        entries
    }
}
