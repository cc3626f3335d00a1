//! Payment form walkthrough
//!
//! This example drives the sample payment form the way a rendered page
//! would: typing into each field, submitting too early, fixing the input and
//! submitting again.
//!
//! Run with: cargo run --example payment_form

use payform::card::{card_type, format_number};
use payform::engine::FieldOverrides;
use payform::payment::{
    admits_card_input, number_max_length, payment_form, CVC, EXPIRATION, NAME, NUMBER,
};
use payform::{ErrorMap, ValidationEngine};

fn print_errors(label: &str, errors: &ErrorMap) {
    println!("{label}:");
    if errors.is_empty() {
        println!("  (no visible errors)");
    }
    for (field, error) in errors {
        match error {
            Some(message) => println!("  {field}: {message}"),
            None => println!("  {field}: ok"),
        }
    }
}

fn type_number(engine: &mut ValidationEngine, input: &str, display: &mut String) {
    for ch in input.chars() {
        let typed = format!("{display}{ch}");
        let overrides = FieldOverrides::new()
            .rule(admits_card_input)
            .on_change(|raw| *display = format_number(card_type(raw), raw));
        engine.field_with(NUMBER, overrides).on_change(&typed);
    }
}

fn main() -> Result<(), payform::ConfigError> {
    println!("=== Payment Form Example ===\n");

    let mut engine = ValidationEngine::new(payment_form())?;
    println!("Session {} started at {}", engine.session_id(), engine.started_at());
    println!("Pristine: {}\n", engine.is_form_pristine());

    engine.field(NAME).on_change("tg").on_blur();
    engine.field(EXPIRATION).on_change("05/2020").on_blur();
    print_errors("Before submit (errors hidden)", &engine.errors());
    println!("Form valid: {}\n", engine.is_form_valid());

    let snapshot = engine.form().on_submit();
    print_errors("After first submit", &engine.errors());
    println!("Submitted snapshot valid: {}\n", snapshot.is_form_valid);

    let mut display = String::new();
    type_number(&mut engine, "3412123456x12345", &mut display);
    println!("Card number shown as: {display}");
    println!("Detected card: {}", card_type(&display).kind.name());
    println!("Max input length: {}\n", number_max_length(engine.state().values()));

    engine.field(NAME).on_change("Jane Doe");
    engine.field(EXPIRATION).on_change("01/2030");
    engine.field(CVC).on_change("123");
    print_errors("CVC too short for amex", &engine.errors());

    engine.field(CVC).on_change("1234");
    print_errors("\nAll fields corrected", &engine.errors());

    let snapshot = engine.form().on_submit();
    println!("\nFinal submit valid: {}", snapshot.is_form_valid);
    for (field, value) in &snapshot.values {
        println!("  {field} = {value:?}");
    }

    engine.reset_fields(payment_form())?;
    println!("\nAfter reset: pristine = {}", engine.is_form_pristine());

    Ok(())
}
