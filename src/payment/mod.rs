//! The sample card payment form.
//!
//! Four fields (cardholder name, card number, expiration, CVC) with custom
//! validators whose rules depend on the detected card type. The config is a
//! resolver over the current values: the card number selects the card kind,
//! which sets the number pattern and the expected CVC length.

use crate::builder::FormConfigBuilder;
use crate::card::{card_type, CardKind};
use crate::config::{ConfigSource, FormConfig, ShowErrors};
use crate::core::{FieldConfig, FieldValues, RuleConfig, Validator, CARD_TYPE};
use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

pub const NAME: &str = "Name";
pub const NUMBER: &str = "number";
pub const EXPIRATION: &str = "Expiration";
pub const CVC: &str = "CVC";

pub const CHECK_NUMBER: &str = "checkNumber";
pub const CHECK_EXPIRATION_FORMAT: &str = "checkExpirationFormat";
pub const CHECK_EXPIRATION_DATE: &str = "checkExpirationDate";
pub const CHECK_CVC_TYPE: &str = "checkCvcType";

/// Fallback `maxlength` of the number input before a card is recognized.
pub const DEFAULT_NUMBER_MAX_LENGTH: usize = 16;

static EXPIRATION_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{4})$").expect("expiration pattern is valid"));

static CARD_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^$|[0-9\s]$").expect("card input pattern is valid"));

/// Admission rule for the number input: empty, or ending in a digit or
/// whitespace.
pub fn admits_card_input(raw: &str) -> bool {
    CARD_INPUT.is_match(raw)
}

/// Card kind implied by the current number, if one has been typed.
pub fn detected_card(values: &FieldValues) -> Option<CardKind> {
    values
        .get(NUMBER)
        .filter(|number| !number.is_empty())
        .map(|number| card_type(number).kind)
}

/// `maxlength` for the number input given the current values.
pub fn number_max_length(values: &FieldValues) -> usize {
    detected_card(values)
        .map(|kind| kind.card_type().max_length)
        .unwrap_or(DEFAULT_NUMBER_MAX_LENGTH)
}

/// Fails when a card kind is known and a non-empty number does not match
/// its pattern, or when `cardType` names no known card.
pub fn check_number() -> Validator {
    Validator::new(|rule| {
        let message = rule.message().to_string();
        let card = rule.card_kind().map(CardKind::card_type);
        let misconfigured = rule.invalid_card_type().is_some();
        Box::new(move |value| match (value, card) {
            _ if misconfigured => Some(message.clone()),
            (Some(number), Some(card)) if !number.is_empty() && !card.matches(number) => {
                Some(message.clone())
            }
            _ => None,
        })
    })
}

/// Fails unless the value is `MM/YYYY`.
pub fn check_expiration_format() -> Validator {
    Validator::new(|rule| {
        let message = rule.message().to_string();
        Box::new(move |value| {
            (!EXPIRATION_FORMAT.is_match(value.unwrap_or(""))).then(|| message.clone())
        })
    })
}

/// Fails when `MM/YYYY` lies before `today`.
///
/// The comparison is kept literal: a card is expired when its year is before
/// the current year, or when its month number is below the current zero-based
/// month and its year is not after the current year. Values that do not
/// parse pass; the format rule reports those.
pub fn check_expiration_date(today: NaiveDate) -> Validator {
    let current_year = i64::from(today.year());
    let current_month = i64::from(today.month0());

    Validator::new(move |rule| {
        let message = rule.message().to_string();
        Box::new(move |value| {
            let mut parts = value.unwrap_or("").split('/');
            let month = parts.next().and_then(|m| m.parse::<i64>().ok());
            let year = parts.next().and_then(|y| y.parse::<i64>().ok());

            let expired = match (month, year) {
                (_, Some(year)) if year < current_year => true,
                (Some(month), Some(year)) => month < current_month && year <= current_year,
                _ => false,
            };
            expired.then(|| message.clone())
        })
    })
}

/// Fails when a card kind is known and a non-empty CVC has the wrong length,
/// or when `cardType` names no known card.
pub fn check_cvc_type() -> Validator {
    Validator::new(|rule| {
        let message = rule.message().to_string();
        let expected = rule.card_kind().map(|kind| kind.card_type().cvc_length);
        let misconfigured = rule.invalid_card_type().is_some();
        Box::new(move |value| match (value, expected) {
            _ if misconfigured => Some(message.clone()),
            (Some(cvc), Some(length)) if !cvc.is_empty() && cvc.chars().count() != length => {
                Some(message.clone())
            }
            _ => None,
        })
    })
}

fn with_card(rule: RuleConfig, card: Option<CardKind>) -> RuleConfig {
    match card {
        Some(kind) => rule.with_param(CARD_TYPE, kind.name()),
        None => rule,
    }
}

/// The payment form config for a snapshot of values, checked against `today`.
pub fn payment_form_config(values: &FieldValues, today: NaiveDate) -> FormConfig {
    let card = detected_card(values);

    FormConfigBuilder::new()
        .field_with(NAME, |f| {
            f.required("Please provide a name as it appears on your card")
                .min_length(3, "Please provide a proper name")
        })
        .field(
            NUMBER,
            FieldConfig::new()
                .with_rule("isRequired", "Please provide a credit card number")
                .with_rule(
                    CHECK_NUMBER,
                    with_card(RuleConfig::new("Invalid card number"), card),
                ),
        )
        .field_with(EXPIRATION, |f| {
            f.required("Please provide an expiration in the form of MM/YYYY")
                .rule(
                    CHECK_EXPIRATION_FORMAT,
                    "Please provide an expiration in the form of MM/YYYY",
                )
                .rule(CHECK_EXPIRATION_DATE, "This card is expired")
        })
        .field(
            CVC,
            FieldConfig::new()
                .with_rule("isRequired", "Please provide a CVC")
                .with_rule(
                    CHECK_CVC_TYPE,
                    with_card(RuleConfig::new("CVC does not match card type"), card),
                ),
        )
        .validator(CHECK_NUMBER, check_number())
        .validator(CHECK_EXPIRATION_FORMAT, check_expiration_format())
        .validator(CHECK_EXPIRATION_DATE, check_expiration_date(today))
        .validator(CHECK_CVC_TYPE, check_cvc_type())
        .show_errors(ShowErrors::Submit)
        .build()
}

/// Payment form resolver checking expiry against a fixed date.
pub fn payment_form_on(today: NaiveDate) -> ConfigSource {
    ConfigSource::resolver(move |values: &FieldValues| payment_form_config(values, today))
}

/// Payment form resolver checking expiry against the local date at the time
/// the form is created.
pub fn payment_form() -> ConfigSource {
    payment_form_on(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn values(number: &str) -> FieldValues {
        let mut values = FieldValues::new();
        values.insert(NUMBER.to_string(), number.to_string());
        values
    }

    #[test]
    fn card_input_admission() {
        assert!(admits_card_input(""));
        assert!(admits_card_input("4111"));
        assert!(admits_card_input("4111 "));
        assert!(!admits_card_input("4111a"));
        assert!(admits_card_input("a1"));
    }

    #[test]
    fn card_is_detected_from_number() {
        assert_eq!(detected_card(&FieldValues::new()), None);
        assert_eq!(detected_card(&values("")), None);
        assert_eq!(detected_card(&values("37")), Some(CardKind::Amex));
        assert_eq!(detected_card(&values("4")), Some(CardKind::Visa));
        assert_eq!(detected_card(&values("9")), Some(CardKind::Unknown));
    }

    #[test]
    fn max_length_follows_card() {
        assert_eq!(number_max_length(&FieldValues::new()), 16);
        assert_eq!(number_max_length(&values("34")), 17);
        assert_eq!(number_max_length(&values("4")), 19);
    }

    #[test]
    fn expiration_format() {
        let rule = RuleConfig::new("format");
        let check = check_expiration_format().bind(&rule);
        assert_eq!(check(Some("01/2030")), None);
        assert!(check(Some("1/2030")).is_some());
        assert!(check(Some("123")).is_some());
        assert!(check(Some("01-2030")).is_some());
    }

    #[test]
    fn expiration_date_uses_literal_comparison() {
        let rule = RuleConfig::new("This card is expired");
        let check = check_expiration_date(date(2026, 10, 19)).bind(&rule);

        assert!(check(Some("05/2020")).is_some());
        assert!(check(Some("12/2025")).is_some());
        assert!(check(Some("08/2026")).is_some());
        assert_eq!(check(Some("09/2026")), None);
        assert_eq!(check(Some("10/2026")), None);
        assert_eq!(check(Some("01/2030")), None);
    }

    #[test]
    fn expiration_date_ignores_unparseable_values() {
        let rule = RuleConfig::new("expired");
        let check = check_expiration_date(date(2026, 10, 19)).bind(&rule);
        assert_eq!(check(Some("")), None);
        assert_eq!(check(Some("123")), None);
        assert_eq!(check(None), None);
    }

    #[test]
    fn number_check_needs_card_and_value() {
        let check = check_number().bind(&RuleConfig::new("Invalid card number"));
        assert_eq!(check(Some("123")), None);

        let amex = RuleConfig::new("Invalid card number").with_param("cardType", "amex");
        let check = check_number().bind(&amex);
        assert_eq!(check(Some("")), None);
        assert_eq!(check(Some("3412 123456 12345")), None);
        assert!(check(Some("3412 1234")).is_some());
    }

    #[test]
    fn cvc_length_depends_on_card() {
        let amex = RuleConfig::new("CVC does not match card type").with_param("cardType", "amex");
        let check = check_cvc_type().bind(&amex);
        assert!(check(Some("123")).is_some());
        assert_eq!(check(Some("1234")), None);
        assert_eq!(check(Some("")), None);

        let unknown_card = check_cvc_type().bind(&RuleConfig::new("CVC does not match card type"));
        assert_eq!(unknown_card(Some("1")), None);
    }

    #[test]
    fn card_checks_fail_for_unrecognized_card_type() {
        let number = RuleConfig::new("Invalid card number").with_param("cardType", "discover");
        assert!(check_number().bind(&number)(Some("4111 1111 1111 1111")).is_some());

        let cvc = RuleConfig::new("CVC does not match card type").with_param("cardType", "Amex");
        assert!(check_cvc_type().bind(&cvc)(Some("1234")).is_some());
    }

    #[test]
    fn config_follows_detected_card() {
        let config = payment_form_config(&values("3712"), date(2026, 1, 1));
        let cvc_rule = config.fields[CVC].rule(CHECK_CVC_TYPE).unwrap();
        assert_eq!(cvc_rule.card_kind(), Some(CardKind::Amex));

        let blank = payment_form_config(&FieldValues::new(), date(2026, 1, 1));
        assert_eq!(blank.fields[CVC].rule(CHECK_CVC_TYPE).unwrap().card_kind(), None);
        assert_eq!(blank.policy(), ShowErrors::Submit);
    }
}
