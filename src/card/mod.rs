//! Card-type classification and number formatting.
//!
//! These helpers are pure functions over the raw text typed into a card
//! number field. The engine never calls them directly; the payment form uses
//! them to derive cross-field rules (card number pattern, CVC length) and to
//! display a masked version of the number.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Mask character that stands for one digit.
pub const DIGIT_SLOT: char = '0';

static AMEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:3[47][0-9]{2})[\s,](?:[0-9]{6})[\s,](?:[0-9]{5})$")
        .expect("amex pattern is valid")
});

static VISA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:4[0-9]{3})[\s,]([0-9]{4})[\s,]([0-9]{4})[\s,]([0-9]{4})$")
        .expect("visa pattern is valid")
});

static UNKNOWN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})[\s,]([0-9]{4})[\s,]([0-9]{4})[\s,]([0-9]{4})$")
        .expect("generic card pattern is valid")
});

static AMEX: CardType = CardType {
    kind: CardKind::Amex,
    mask: "0000 000000 00000",
    image_name: "amex",
    max_length: 17,
    cvc_length: 4,
    pattern: &AMEX_PATTERN,
};

static VISA: CardType = CardType {
    kind: CardKind::Visa,
    mask: "0000 0000 0000 0000",
    image_name: "visa",
    max_length: 19,
    cvc_length: 3,
    pattern: &VISA_PATTERN,
};

static UNKNOWN: CardType = CardType {
    kind: CardKind::Unknown,
    mask: "0000 0000 0000 0000",
    image_name: "unknown",
    max_length: 19,
    cvc_length: 3,
    pattern: &UNKNOWN_PATTERN,
};

/// The card networks the form can recognize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Amex,
    Visa,
    Unknown,
}

impl CardKind {
    /// Name used for this kind in rule parameters (`cardType`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Amex => "amex",
            Self::Visa => "visa",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a kind from its rule-parameter name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "amex" => Some(Self::Amex),
            "visa" => Some(Self::Visa),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Static description of this kind.
    pub fn card_type(self) -> &'static CardType {
        match self {
            Self::Amex => &AMEX,
            Self::Visa => &VISA,
            Self::Unknown => &UNKNOWN,
        }
    }
}

/// Display and validation properties of one card kind.
#[derive(Debug)]
pub struct CardType {
    pub kind: CardKind,
    /// Display mask; `0` marks a digit slot, anything else is a separator.
    pub mask: &'static str,
    pub image_name: &'static str,
    /// Maximum length of the formatted number, separators included.
    pub max_length: usize,
    pub cvc_length: usize,
    pattern: &'static LazyLock<Regex>,
}

impl CardType {
    /// Check whether a formatted number is well-formed for this card kind.
    pub fn matches(&self, number: &str) -> bool {
        self.pattern.is_match(number)
    }
}

/// Classify a raw card number by its prefix.
///
/// `34`/`37` select amex, a leading `4` selects visa, anything else
/// (including empty input) is unknown.
///
/// # Example
///
/// ```rust
/// use payform::card::{card_type, CardKind};
///
/// assert_eq!(card_type("3712").kind, CardKind::Amex);
/// assert_eq!(card_type("4111").kind, CardKind::Visa);
/// assert_eq!(card_type("").kind, CardKind::Unknown);
/// ```
pub fn card_type(raw: &str) -> &'static CardType {
    if raw.starts_with("34") || raw.starts_with("37") {
        &AMEX
    } else if raw.starts_with('4') {
        &VISA
    } else {
        &UNKNOWN
    }
}

/// Overlay the digits of `raw` onto the card's mask.
///
/// Non-digit input is discarded first. Digit slots without a digit left to
/// fill become blanks, and trailing blanks are trimmed.
///
/// # Example
///
/// ```rust
/// use payform::card::{card_type, format_number};
///
/// let raw = "4111-1111-1111-1111";
/// assert_eq!(format_number(card_type(raw), raw), "4111 1111 1111 1111");
/// assert_eq!(format_number(card_type("3712"), "371234"), "3712 34");
/// ```
pub fn format_number(card: &CardType, raw: &str) -> String {
    let mut digits = raw.chars().filter(char::is_ascii_digit);

    let overlaid: String = card
        .mask
        .chars()
        .map(|slot| {
            if slot == DIGIT_SLOT {
                digits.next().unwrap_or(' ')
            } else {
                slot
            }
        })
        .collect();

    overlaid.trim().to_string()
}
