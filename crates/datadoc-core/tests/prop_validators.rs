//! Property-based tests for the validator library
//!
//! These verify the engine's structural guarantees across a wide range of
//! inputs: no panics, idempotent checks, canonicalization fixpoints, and
//! total localization picks.

use datadoc_core::validators::{
    check_list_size, is_bool, is_dictionary, is_header_string, is_int, is_list,
    is_localized_string, is_number, is_string, is_string_line, is_url, list_has_unique_strings,
    required, string_to_list, unique_sort_str_list, use_default, validate_data_type,
};
use datadoc_core::{
    validate_data_document, validators, ChainBuilder, Config, FieldValue, LocaleConfig, Path,
    Validator, ValidationMode,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 10, 5, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            proptest::collection::hash_map("[a-zA-Z_][a-zA-Z0-9_]{0,20}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strategy for localized-string maps that pass validation
fn localized_map_strategy() -> impl Strategy<Value = Value> {
    proptest::collection::btree_map(
        prop_oneof!["en|de|fr|ja|zh", "[a-z]{2}", "[a-z]{2}-[a-z0-9]{2,4}"],
        "[a-zA-Z0-9 ]{0,60}",
        1..6,
    )
    .prop_map(|m| {
        let map: Map<String, Value> = m
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        Value::Object(map)
    })
}

fn every_validator() -> Vec<Validator> {
    vec![
        is_bool(),
        is_string(),
        is_string_line(40),
        is_int(),
        is_number(),
        is_list(),
        is_dictionary(),
        is_url(),
        is_header_string(),
        list_has_unique_strings(),
        check_list_size(3, "probe"),
        is_localized_string(40),
        use_default(json!("fallback"), true),
        required(),
        validators::delete_field(),
        string_to_list(),
        unique_sort_str_list(),
        validate_data_type(ChainBuilder::new()),
    ]
}

proptest! {
    /// Property: no library validator panics on any JSON input
    #[test]
    fn prop_validators_never_panic(input in json_value_strategy()) {
        let path = Path::field("probe");
        let doc = json!({});
        for validator in every_validator() {
            let mut value = FieldValue::new(input.clone());
            validator.check(&mut value, &path, &doc);
        }
    }

    /// Property: an accepting type check is idempotent -- the second run
    /// adds no errors and leaves the value untouched
    #[test]
    fn prop_accepting_checks_are_idempotent(input in json_value_strategy()) {
        let path = Path::field("probe");
        let doc = json!({});
        for validator in [is_bool(), is_string(), is_int(), is_number(), is_list(), is_dictionary()] {
            let mut value = FieldValue::new(input.clone());
            if validator.check(&mut value, &path, &doc) {
                let after_first = value.value().clone();
                let verdict = validator.check(&mut value, &path, &doc);
                prop_assert!(verdict);
                prop_assert!(!value.has_errors());
                prop_assert_eq!(value.value(), &after_first);
            }
        }
    }

    /// Property: unique_sort_str_list yields a sorted, duplicate-free list
    /// and is idempotent
    #[test]
    fn prop_unique_sort_str_list(items in proptest::collection::vec("[a-z]{1,6}", 0..12)) {
        let mut value = FieldValue::new(json!(items));
        let path = Path::field("probe");
        validators::run(&[unique_sort_str_list()], &mut value, &path, &json!({}));

        let sorted = value.value().as_array().unwrap().clone();
        let strings: Vec<&str> = sorted.iter().filter_map(Value::as_str).collect();
        prop_assert!(strings.windows(2).all(|w| w[0] < w[1]));
        for item in &items {
            prop_assert!(strings.contains(&item.as_str()));
        }

        validators::run(&[unique_sort_str_list()], &mut value, &path, &json!({}));
        prop_assert_eq!(value.value().as_array().unwrap(), &sorted);
    }

    /// Property: localized-string canonicalization is a fixpoint -- the
    /// output re-validates without errors or reordering
    #[test]
    fn prop_localized_string_fixpoint(input in localized_map_strategy()) {
        let path = Path::field("probe");
        let mut value = FieldValue::new(input);
        validators::run(&[is_localized_string(400)], &mut value, &path, &json!({}));
        prop_assert!(!value.has_errors());

        let canonical = value.value().clone();
        let canonical_keys: Vec<&String> = canonical.as_object().unwrap().keys().collect();
        let mut sorted_keys = canonical_keys.clone();
        sorted_keys.sort();
        prop_assert_eq!(&canonical_keys, &sorted_keys);

        validators::run(&[is_localized_string(400)], &mut value, &path, &json!({}));
        prop_assert!(!value.has_errors());
        prop_assert_eq!(value.value(), &canonical);
    }

    /// Property: a localized pick on a non-empty canonical map always
    /// returns a string, whatever language is requested
    #[test]
    fn prop_pick_is_total(map in localized_map_strategy(), lang in "[a-z]{2,3}") {
        let locales = LocaleConfig::default();
        let map = map.as_object().unwrap().clone();
        let picked = datadoc_core::pick_localized_string(&map, &lang, &locales);
        prop_assert!(picked.is_some());
    }

    /// Property: validating an already-validated data document is a
    /// fixpoint -- no errors, identical normalized output
    #[test]
    fn prop_data_document_fixpoint(
        description in localized_map_strategy(),
        license_index in 0usize..5,
        sources in "[a-zA-Z0-9 \\[\\]:/.]{0,80}",
    ) {
        let config = Config::default();
        let license = config.allowed_licenses[license_index % config.allowed_licenses.len()].clone();
        let raw = json!({
            "license": license,
            "description": description,
            "sources": sources,
        });

        let first = validate_data_document(&config, &raw, ValidationMode::Thorough);
        prop_assert!(first.is_valid(), "errors: {:?}", first.errors());

        let second = validate_data_document(&config, first.data(), ValidationMode::Thorough);
        prop_assert!(second.is_valid());
        prop_assert_eq!(second.data(), first.data());
    }
}
