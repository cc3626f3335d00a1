//! Schema checks, accumulating every violation with `Validation`.

use crate::config::{FormConfig, ShowErrors};
use crate::core::builtin::LENGTH_RULES;
use crate::core::{ValidatorRegistry, CARD_TYPE, INITIAL_VALUE};
use crate::schema::violations::{ConfigError, SchemaViolation};
use serde_json::{Map, Value};
use stillwater::validation::Validation;

type SchemaCheck = Validation<(), Vec<SchemaViolation>>;

fn pass() -> SchemaCheck {
    Validation::Success(())
}

fn violation(v: SchemaViolation) -> SchemaCheck {
    Validation::Failure(vec![v])
}

fn finish(checks: Vec<SchemaCheck>) -> Result<(), ConfigError> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(violations) => Err(ConfigError::Schema(violations)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check the shape of a JSON form configuration.
///
/// Reports, all at once: a non-object document, a non-object `fields`, any
/// non-object field entry, any rule that is neither a message string nor an
/// object with a string `message`, and an unrecognized `showErrors`.
pub fn check_document(document: &Value) -> Result<(), ConfigError> {
    let Some(root) = document.as_object() else {
        return finish(vec![violation(SchemaViolation::NotAnObject {
            found: type_name(document),
        })]);
    };

    let mut checks = vec![check_show_errors(root.get("showErrors"))];

    match root.get("fields") {
        Some(Value::Object(fields)) => {
            for (field, entry) in fields {
                checks.push(check_field_entry(field, entry));
            }
        }
        other => checks.push(violation(SchemaViolation::FieldsNotAnObject {
            found: other.map_or("nothing", type_name),
        })),
    }

    finish(checks)
}

fn check_show_errors(value: Option<&Value>) -> SchemaCheck {
    match value {
        None | Some(Value::Null) => pass(),
        Some(Value::String(name)) if ShowErrors::NAMES.contains(&name.as_str()) => pass(),
        Some(other) => violation(SchemaViolation::UnsupportedShowErrors {
            value: other.to_string(),
        }),
    }
}

fn check_field_entry(field: &str, entry: &Value) -> SchemaCheck {
    let Some(rules) = entry.as_object() else {
        return violation(SchemaViolation::FieldNotAnObject {
            field: field.to_string(),
            found: type_name(entry),
        });
    };

    let checks = rules
        .iter()
        .filter(|(name, _)| name.as_str() != INITIAL_VALUE)
        .map(|(rule, value)| check_rule_shape(field, rule, value))
        .collect();
    Validation::all_vec(checks).map(|_| ())
}

fn check_rule_shape(field: &str, rule: &str, value: &Value) -> SchemaCheck {
    let well_formed = match value {
        Value::String(_) => true,
        Value::Object(object) => has_string_message(object),
        _ => false,
    };

    if well_formed {
        pass()
    } else {
        violation(SchemaViolation::MalformedRule {
            field: field.to_string(),
            rule: rule.to_string(),
        })
    }
}

fn has_string_message(object: &Map<String, Value>) -> bool {
    matches!(object.get("message"), Some(Value::String(_)))
}

/// Check a typed configuration against the validators it will run with.
///
/// Reports every rule name the registry cannot resolve, every length rule
/// missing its unsigned `length` parameter, and every `cardType` parameter
/// that names no known card.
pub fn check_config(config: &FormConfig, registry: &ValidatorRegistry) -> Result<(), ConfigError> {
    let mut checks = Vec::new();

    for (field, field_config) in &config.fields {
        for (rule, rule_config) in field_config.rules() {
            if !registry.contains(rule) {
                checks.push(violation(SchemaViolation::UnknownValidator {
                    field: field.clone(),
                    rule: rule.to_string(),
                }));
                continue;
            }

            let custom = config.custom_validators.contains_key(rule);
            if !custom && LENGTH_RULES.contains(&rule) && rule_config.length().is_none() {
                checks.push(violation(SchemaViolation::MissingParameter {
                    field: field.clone(),
                    rule: rule.to_string(),
                    param: "length",
                }));
            }

            if let Some(value) = rule_config.invalid_card_type() {
                checks.push(violation(SchemaViolation::InvalidParameter {
                    field: field.clone(),
                    rule: rule.to_string(),
                    param: CARD_TYPE,
                    value: value.to_string(),
                }));
            }
        }
    }

    finish(checks)
}
