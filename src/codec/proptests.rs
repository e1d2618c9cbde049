//! Property-based tests for the section codec.

use super::{decode_option, decode_section, evaluate, flatten_section};
use crate::error::OptionErrorKind;
use crate::{Error, Map, Value};
use proptest::prelude::*;

// Lowercase-led words never collide with None/True/False or numeric literals
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}( [a-z0-9_]{1,8}){0,2}"
}

// Strings that only stay strings if the flattener quotes them
fn literal_text_strategy() -> impl Strategy<Value = String> {
    let looks_like_literal = prop::sample::select(vec![
        "True", "False", "None", "5", "-2.5", "0x1f", "1e400", "'quoted'", "[1, 2]", "{}",
    ])
    .prop_map(String::from);
    prop_oneof![
        looks_like_literal,
        text_strategy().prop_map(|s| format!("  {s} ")),
    ]
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(Value::Float),
        text_strategy().prop_map(Value::String),
        literal_text_strategy().prop_map(Value::String),
    ]
}

// Depth 1: a scalar or a list of scalars
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => scalar_strategy(),
        1 => prop::collection::vec(scalar_strategy(), 0..4).prop_map(Value::List),
    ]
}

fn map_of(
    value: impl Strategy<Value = Value>,
    size: std::ops::Range<usize>,
) -> impl Strategy<Value = Map> {
    prop::collection::vec((word_strategy(), value), size)
        .prop_map(|entries| entries.into_iter().collect())
}

// Depth 3: a map literal nested inside a sub-option
fn nested_map_strategy() -> impl Strategy<Value = Value> {
    map_of(leaf_strategy(), 0..3).prop_map(Value::Map)
}

// Depth 2: sub-options written as `key: value` lines
fn sub_options_strategy() -> impl Strategy<Value = Value> {
    map_of(
        prop_oneof![3 => leaf_strategy(), 1 => nested_map_strategy()],
        0..4,
    )
    .prop_map(Value::Map)
}

fn section_strategy() -> impl Strategy<Value = Map> {
    map_of(
        prop_oneof![2 => leaf_strategy(), 1 => sub_options_strategy()],
        0..6,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Flattening a section and decoding it again gives back the same section
    #[test]
    fn flatten_then_decode_round_trips(section in section_strategy()) {
        let flat = flatten_section(&section);
        prop_assert_eq!(decode_section(&flat), section);
    }

    // Flattened output is stable: a second pass renders identical text
    #[test]
    fn flatten_is_stable(section in section_strategy()) {
        let flat = flatten_section(&section);
        let again = flatten_section(&decode_section(&flat));
        prop_assert_eq!(again, flat);
    }

    // Text without any colon is never option-shaped
    #[test]
    fn colon_free_text_is_rejected(raw in "[a-zA-Z0-9 \n\\[\\],']{0,30}") {
        let result = decode_option(&raw);
        prop_assert!(
            matches!(
                result,
                Err(Error::InvalidConfigOption { kind: OptionErrorKind::Malformed, .. })
            ),
            "expected malformed option error"
        );
    }

    // The display form of any integer evaluates back to the integer
    #[test]
    fn integers_evaluate_exactly(n in any::<i64>()) {
        prop_assert_eq!(evaluate(&n.to_string()), Value::Int(n));
    }

    // The display form of any finite float evaluates back to the same float
    #[test]
    fn floats_evaluate_exactly(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert_eq!(evaluate(&Value::Float(f).to_string()), Value::Float(f));
    }

    // Evaluation never panics, whatever the input
    #[test]
    fn evaluate_is_total(raw in "\\PC{0,40}") {
        let _ = evaluate(&raw);
    }
}
