//! Built-in validators.
//!
//! Every built-in reads its message (and any parameters) from the rule
//! configuration once, at bind time.

use super::validator::Validator;

pub const IS_REQUIRED: &str = "isRequired";
pub const IS_NUMBER: &str = "isNumber";
pub const IS_LENGTH: &str = "isLength";
pub const IS_MIN_LENGTH: &str = "isMinLength";
pub const IS_CARD_NUMBER_CORRECT: &str = "isCardNumberCorrect";

/// Names of the built-in validators, in registration order.
pub const BUILTIN_NAMES: [&str; 5] = [
    IS_REQUIRED,
    IS_NUMBER,
    IS_LENGTH,
    IS_MIN_LENGTH,
    IS_CARD_NUMBER_CORRECT,
];

/// Built-ins that cannot work without an unsigned `length` parameter.
pub const LENGTH_RULES: [&str; 2] = [IS_LENGTH, IS_MIN_LENGTH];

/// Look up a built-in validator by name.
pub fn builtin(name: &str) -> Option<Validator> {
    match name {
        IS_REQUIRED => Some(is_required()),
        IS_NUMBER => Some(is_number()),
        IS_LENGTH => Some(is_length()),
        IS_MIN_LENGTH => Some(is_min_length()),
        IS_CARD_NUMBER_CORRECT => Some(is_card_number_correct()),
        _ => None,
    }
}

/// Fails when the value is empty or absent.
pub fn is_required() -> Validator {
    Validator::new(|rule| {
        let message = rule.message().to_string();
        Box::new(move |value| match value {
            None | Some("") => Some(message.clone()),
            Some(_) => None,
        })
    })
}

/// Fails unless the whole value parses as a finite number.
pub fn is_number() -> Validator {
    Validator::new(|rule| {
        let message = rule.message().to_string();
        Box::new(move |value| {
            let numeric = value
                .and_then(|v| v.parse::<f64>().ok())
                .is_some_and(f64::is_finite);
            (!numeric).then(|| message.clone())
        })
    })
}

/// Fails unless the value has exactly `length` characters.
pub fn is_length() -> Validator {
    Validator::new(|rule| {
        let message = rule.message().to_string();
        let length = rule.length();
        Box::new(move |value| {
            let count = value.unwrap_or("").chars().count();
            match length {
                Some(expected) if count == expected => None,
                _ => Some(message.clone()),
            }
        })
    })
}

/// Fails unless the value has at least `length` characters.
pub fn is_min_length() -> Validator {
    Validator::new(|rule| {
        let message = rule.message().to_string();
        let length = rule.length();
        Box::new(move |value| {
            let count = value.unwrap_or("").chars().count();
            match length {
                Some(minimum) if count >= minimum => None,
                _ => Some(message.clone()),
            }
        })
    })
}

/// Fails when a `cardType` is configured and the value does not match its
/// number pattern. Without a `cardType` the rule always passes; a `cardType`
/// naming no known card fails every value.
pub fn is_card_number_correct() -> Validator {
    Validator::new(|rule| {
        let message = rule.message().to_string();
        let card = rule.card_kind().map(|kind| kind.card_type());
        let misconfigured = rule.invalid_card_type().is_some();
        Box::new(move |value| match card {
            Some(card) if !card.matches(value.unwrap_or("")) => Some(message.clone()),
            None if misconfigured => Some(message.clone()),
            _ => None,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuleConfig;

    fn run(validator: Validator, rule: &RuleConfig, value: Option<&str>) -> Option<String> {
        validator.check(rule, value)
    }

    #[test]
    fn required_fails_on_empty_and_absent() {
        let rule = RuleConfig::new("required");
        assert_eq!(run(is_required(), &rule, Some("")), Some("required".into()));
        assert_eq!(run(is_required(), &rule, None), Some("required".into()));
        assert_eq!(run(is_required(), &rule, Some(" ")), None);
        assert_eq!(run(is_required(), &rule, Some("x")), None);
    }

    #[test]
    fn number_accepts_only_numeric_text() {
        let rule = RuleConfig::new("not a number");
        assert_eq!(run(is_number(), &rule, Some("42")), None);
        assert_eq!(run(is_number(), &rule, Some("-3.5")), None);
        assert!(run(is_number(), &rule, Some("4 2")).is_some());
        assert!(run(is_number(), &rule, Some("")).is_some());
        assert!(run(is_number(), &rule, Some("inf")).is_some());
        assert!(run(is_number(), &rule, None).is_some());
    }

    #[test]
    fn length_requires_exact_count() {
        let rule = RuleConfig::new("bad length").with_param("length", 3);
        assert_eq!(run(is_length(), &rule, Some("123")), None);
        assert!(run(is_length(), &rule, Some("12")).is_some());
        assert!(run(is_length(), &rule, Some("1234")).is_some());
        assert!(run(is_length(), &rule, None).is_some());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let rule = RuleConfig::new("bad length").with_param("length", 3);
        assert_eq!(run(is_length(), &rule, Some("żół")), None);
    }

    #[test]
    fn min_length_accepts_longer_values() {
        let rule = RuleConfig::new("Please provide a proper name").with_param("length", 3);
        assert!(run(is_min_length(), &rule, Some("tg")).is_some());
        assert_eq!(run(is_min_length(), &rule, Some("tgx")), None);
        assert_eq!(run(is_min_length(), &rule, Some("Test Name")), None);
    }

    #[test]
    fn length_rules_fail_without_length_parameter() {
        let rule = RuleConfig::new("misconfigured");
        assert!(run(is_length(), &rule, Some("abc")).is_some());
        assert!(run(is_min_length(), &rule, Some("abc")).is_some());
    }

    #[test]
    fn card_number_rule_uses_configured_card_type() {
        let rule = RuleConfig::new("Invalid card number").with_param("cardType", "visa");
        assert_eq!(
            run(is_card_number_correct(), &rule, Some("4111 1111 1111 1111")),
            None
        );
        assert!(run(is_card_number_correct(), &rule, Some("4111")).is_some());
    }

    #[test]
    fn card_number_rule_passes_without_card_type() {
        let rule = RuleConfig::new("Invalid card number");
        assert_eq!(run(is_card_number_correct(), &rule, Some("garbage")), None);
    }

    #[test]
    fn card_number_rule_fails_for_unrecognized_card_type() {
        for card_type in ["Visa", "discover"] {
            let rule = RuleConfig::new("Invalid card number").with_param("cardType", card_type);
            assert_eq!(
                run(is_card_number_correct(), &rule, Some("garbage")).as_deref(),
                Some("Invalid card number")
            );
            assert!(run(is_card_number_correct(), &rule, Some("4111 1111 1111 1111")).is_some());
        }
    }

    #[test]
    fn every_builtin_name_resolves() {
        for name in BUILTIN_NAMES {
            assert!(builtin(name).is_some(), "missing builtin {name}");
        }
        assert!(builtin("checkNumber").is_none());
    }
}
