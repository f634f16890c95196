//! Property-based tests for quire-model using proptest.

use proptest::prelude::*;
use quire_model::json::{self, to_json, DuplicateKeys, ParseConfig};
use quire_model::{Model, Number, Value};

// ============================================================================
// Strategies
// ============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \"\\\\\n.,:{}é]{0,12}"
}

fn decimal_strategy() -> impl Strategy<Value = Number> {
    (any::<i32>(), 0u32..1000).prop_map(|(whole, frac)| {
        format!("{whole}.{frac}")
            .parse::<Number>()
            .expect("generated decimal is valid")
    })
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        text_strategy().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        decimal_strategy().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

fn model_strategy() -> impl Strategy<Value = Model> {
    let leaf = prop::collection::vec((key_strategy(), scalar_strategy()), 0..6)
        .prop_map(Model::from_pairs);
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop::collection::vec(
            (
                key_strategy(),
                prop_oneof![scalar_strategy(), inner.prop_map(Value::from)],
            ),
            0..6,
        )
        .prop_map(Model::from_pairs)
    })
}

fn untexted_model_strategy() -> impl Strategy<Value = Model> {
    let scalar = prop_oneof![
        any::<i64>().prop_map(Value::from),
        decimal_strategy().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ];
    prop::collection::vec((key_strategy(), scalar), 0..6).prop_map(|pairs| {
        Model::new().with("outer", Model::from_pairs(pairs)).with("flag", true)
    })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Printing then parsing yields an equal model.
    #[test]
    fn model_text_round_trips(model in model_strategy()) {
        let text = model.to_string();
        prop_assert_eq!(Model::parse(&text).unwrap(), model);
    }

    /// The map view survives printing and parsing unchanged.
    #[test]
    fn map_view_round_trips(model in model_strategy()) {
        let map = model.to_map();
        prop_assert_eq!(json::parse(&to_json(&map)).unwrap(), map);
    }

    /// Converting to a map and back yields an equal model.
    #[test]
    fn map_conversion_round_trips(model in model_strategy()) {
        prop_assert_eq!(Model::from_map(&model.to_map()), model);
    }

    /// Keys come back in first-insertion order, with values in add order.
    #[test]
    fn insertion_order_is_preserved(
        pairs in prop::collection::vec((key_strategy(), any::<i64>()), 0..20),
    ) {
        let model = Model::from_pairs(pairs.iter().map(|(k, v)| (k.clone(), *v)));

        let mut expected_keys: Vec<&str> = Vec::new();
        for (key, _) in &pairs {
            if !expected_keys.contains(&key.as_str()) {
                expected_keys.push(key);
            }
        }
        prop_assert_eq!(model.keys().collect::<Vec<_>>(), expected_keys.clone());

        for key in expected_keys {
            let expected: Vec<i64> = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| *v).collect();
            prop_assert_eq!(model.get_values_as::<i64>(key).unwrap(), expected);
        }
    }

    /// Any text survives quoting and parsing.
    #[test]
    fn strings_round_trip(text in any::<String>()) {
        let model = Model::new().with("text", text.clone());
        let parsed = Model::parse(&model.to_string()).unwrap();
        prop_assert_eq!(parsed.get_as::<String>("text").unwrap(), Some(text));
    }

    /// Parsing never panics on arbitrary input.
    #[test]
    fn parse_never_panics(input in any::<String>()) {
        let _ = json::parse(&input);
    }

    /// Whitespace between tokens does not change the result.
    #[test]
    fn whitespace_is_insignificant(model in untexted_model_strategy()) {
        let compact = model.to_string();
        let spaced = compact
            .replace('{', "{ ")
            .replace(',', " ,\n\t")
            .replace(':', " : ");
        prop_assert_eq!(Model::parse(&spaced).unwrap(), model);
    }

    /// With `LastWins`, only the final value of a repeated key survives.
    #[test]
    fn last_wins_keeps_final_value(first in any::<i64>(), second in any::<i64>()) {
        let text = format!(r#"{{"k":{first},"k":{second}}}"#);
        let config = ParseConfig::default().duplicate_keys(DuplicateKeys::LastWins);
        let parsed = json::parse_with(&text, &config).unwrap();
        prop_assert_eq!(to_json(&parsed), format!(r#"{{"k":{second}}}"#));
    }
}
