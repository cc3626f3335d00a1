//! Property-based tests for the validation engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use payform::builder::FormConfigBuilder;
use payform::engine::{reduce, visible_errors, EngineState, Transition};
use payform::{FieldValues, FormConfig, ShowErrors, ValidationEngine, ValidatorRegistry};
use proptest::prelude::*;

const FIELDS: [&str; 3] = ["name", "code", "note"];

#[derive(Clone, Debug)]
enum Op {
    Change(usize, String),
    Blur(usize),
    Submit,
}

fn form(policy: ShowErrors) -> FormConfig {
    FormConfigBuilder::new()
        .field_with("name", |f| f.required("name required").min_length(3, "name short"))
        .field_with("code", |f| f.required("code required").number("code numeric"))
        .field_with("note", |f| f.initial_value("hi").length(2, "note length"))
        .show_errors(policy)
        .build()
}

prop_compose! {
    fn arbitrary_policy()(variant in 0..3u8) -> ShowErrors {
        match variant {
            0 => ShowErrors::Always,
            1 => ShowErrors::Blur,
            _ => ShowErrors::Submit,
        }
    }
}

prop_compose! {
    fn arbitrary_value()(value in "[a-z0-9 ]{0,6}") -> String {
        value
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..FIELDS.len(), arbitrary_value()).prop_map(|(i, v)| Op::Change(i, v)),
        2 => (0..FIELDS.len()).prop_map(Op::Blur),
        1 => Just(Op::Submit),
    ]
}

fn run(engine: &mut ValidationEngine, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Change(i, value) => {
                engine.field(FIELDS[*i]).on_change(value);
            }
            Op::Blur(i) => {
                engine.field(FIELDS[*i]).on_blur();
            }
            Op::Submit => {
                engine.form().on_submit();
            }
        }
    }
}

proptest! {
    #[test]
    fn validation_is_deterministic(name in arbitrary_value(), code in arbitrary_value()) {
        let config = form(ShowErrors::Always);
        let registry = ValidatorRegistry::builtin();
        let mut values = FieldValues::new();
        values.insert("name".to_string(), name);
        values.insert("code".to_string(), code);

        let first = registry.validate_fields(&values, &config.fields);
        let second = registry.validate_fields(&values, &config.fields);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), config.fields.len());
    }

    #[test]
    fn first_failing_rule_wins(value in arbitrary_value()) {
        let config = form(ShowErrors::Always);
        let registry = ValidatorRegistry::builtin();
        let error = registry.validate_field(Some(value.as_str()), &config.fields["name"]);

        let expected = if value.is_empty() {
            Some("name required")
        } else if value.chars().count() < 3 {
            Some("name short")
        } else {
            None
        };
        prop_assert_eq!(error.as_deref(), expected);
    }

    #[test]
    fn error_map_tracks_every_field(policy in arbitrary_policy(), ops in prop::collection::vec(arbitrary_op(), 0..20)) {
        let mut engine = ValidationEngine::new(form(policy)).unwrap();
        run(&mut engine, &ops);

        let names: Vec<&str> = engine.full_errors().keys().map(String::as_str).collect();
        prop_assert_eq!(names, FIELDS.to_vec());

        let recomputed = engine
            .registry()
            .validate_fields(engine.state().values(), &engine.config().fields);
        prop_assert_eq!(engine.full_errors(), &recomputed);
    }

    #[test]
    fn visibility_follows_policy(policy in arbitrary_policy(), ops in prop::collection::vec(arbitrary_op(), 0..20)) {
        let mut engine = ValidationEngine::new(form(policy)).unwrap();
        run(&mut engine, &ops);

        let visible = engine.errors();
        match policy {
            ShowErrors::Always => {
                prop_assert_eq!(&visible, engine.full_errors());
            }
            ShowErrors::Blur => {
                for name in FIELDS {
                    prop_assert_eq!(visible.contains_key(name), engine.state().is_blurred(name));
                }
            }
            ShowErrors::Submit if engine.submitted() => {
                prop_assert_eq!(&visible, engine.full_errors());
            }
            ShowErrors::Submit => {
                prop_assert!(visible.is_empty());
            }
        }
    }

    #[test]
    fn form_validity_ignores_policy(ops in prop::collection::vec(arbitrary_op(), 0..20)) {
        let mut always = ValidationEngine::new(form(ShowErrors::Always)).unwrap();
        let mut submit = ValidationEngine::new(form(ShowErrors::Submit)).unwrap();
        run(&mut always, &ops);
        run(&mut submit, &ops);

        prop_assert_eq!(always.is_form_valid(), submit.is_form_valid());
        prop_assert_eq!(
            always.is_form_valid(),
            always.full_errors().values().all(Option::is_none)
        );
    }

    #[test]
    fn submitted_and_blurred_only_grow(ops in prop::collection::vec(arbitrary_op(), 1..20)) {
        let mut engine = ValidationEngine::new(form(ShowErrors::Blur)).unwrap();
        let mut submitted = false;
        let mut blurred = [false; 3];

        for op in &ops {
            run(&mut engine, std::slice::from_ref(op));
            submitted |= matches!(op, Op::Submit);
            if let Op::Blur(i) = op {
                blurred[*i] = true;
            }
            prop_assert_eq!(engine.submitted(), submitted);
            for (i, name) in FIELDS.iter().enumerate() {
                prop_assert_eq!(engine.state().is_blurred(name), blurred[i]);
            }
        }
    }

    #[test]
    fn reset_restores_initial_state(ops in prop::collection::vec(arbitrary_op(), 0..20)) {
        let mut engine = ValidationEngine::new(form(ShowErrors::Submit)).unwrap();
        run(&mut engine, &ops);

        engine.reset_fields(form(ShowErrors::Submit)).unwrap();
        let fresh = ValidationEngine::new(form(ShowErrors::Submit)).unwrap();

        prop_assert_eq!(engine.state(), fresh.state());
        prop_assert!(!engine.submitted());
        prop_assert!(engine.errors().is_empty());
    }

    #[test]
    fn reduce_leaves_input_untouched(field in 0..FIELDS.len(), value in arbitrary_value()) {
        let config = form(ShowErrors::Blur);
        let state = EngineState::initial(&config, &ValidatorRegistry::builtin());
        let before = state.clone();

        let mut payload = FieldValues::new();
        payload.insert(FIELDS[field].to_string(), value.clone());
        let changed = reduce(&state, Transition::Change(payload));
        let blurred = reduce(&changed, Transition::Blur(FIELDS[field].to_string()));

        prop_assert_eq!(&state, &before);
        prop_assert_eq!(changed.value(FIELDS[field]), Some(value.as_str()));
        prop_assert!(!changed.is_blurred(FIELDS[field]));
        prop_assert!(blurred.is_blurred(FIELDS[field]));
        prop_assert_eq!(visible_errors(&blurred, ShowErrors::Blur).len(), 1);
    }
}
