//! Mutating validators: defaults, deletions, coercions, canonicalization
//!
//! Unlike the predicate checks, these rewrite the field's content or status.
//! All of them except [`is_localized_string`] and [`validate_data_type`]
//! accept unconditionally.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use super::{checks, keys, ChainBuilder, Validator};
use crate::config::DEFAULT_MAX_LINE_LENGTH;
use crate::util;
use crate::value::Status;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A default for [`use_default`]: a fixed value, or a zero-argument
/// generator invoked at substitution time.
pub enum DefaultValue {
    Fixed(Value),
    Generated(fn() -> Value),
}

impl DefaultValue {
    fn produce(&self) -> Value {
        match self {
            DefaultValue::Fixed(value) => value.clone(),
            DefaultValue::Generated(generate) => generate(),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Fixed(value)
    }
}

/// Substitute `default` when the field is MISSING and mark it `Default`.
///
/// The boolean return equals `validate_default` in the substitution case, so
/// a chain built with `validate_default = false` stops after substituting --
/// the injected default is trusted as-is. A present value passes through
/// untouched.
pub fn use_default<D: Into<DefaultValue>>(default: D, validate_default: bool) -> Validator {
    let default = default.into();
    Validator::new("use_default", move |v, _path, _doc| {
        if v.is_missing() {
            v.set_value(default.produce());
            v.set_status(Status::Default);
            return validate_default;
        }
        true
    })
}

/// Mark the field for deletion from the normalized document.
///
/// Returns `true`: the chain keeps running so a later custom validator can
/// still veto the deletion by resetting the status.
pub fn delete_field() -> Validator {
    Validator::new("delete_field", |v, _path, _doc| {
        v.set_status(Status::Missing);
        true
    })
}

/// Coerce a bare string into a one-element list. Anything else passes
/// through untouched.
pub fn string_to_list() -> Validator {
    Validator::new("string_to_list", |v, _path, _doc| {
        if v.value().is_string() {
            let single = v.value().clone();
            v.set_value(Value::Array(vec![single]));
        }
        true
    })
}

/// Deduplicate and sort a list of strings ascending. Applies only when the
/// field is non-missing and every element is a string; otherwise the value
/// is left untouched. Always continues the chain.
pub fn unique_sort_str_list() -> Validator {
    Validator::new("unique_sort_str_list", |v, _path, _doc| {
        if !v.is_missing() {
            if let Some(items) = v.value().as_array() {
                if util::all_values_are_strings(items) {
                    let mut strings: Vec<String> = items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_owned))
                        .collect();
                    strings.sort();
                    strings.dedup();
                    v.set_value(Value::Array(
                        strings.into_iter().map(Value::String).collect(),
                    ));
                }
            }
        }
        true
    })
}

/// Localized-string map check and canonicalization.
///
/// Accepts a non-missing, non-empty map whose keys are language codes and
/// whose values are single-line strings of at most `max_length` characters.
/// On accept the map is rewritten in canonical key-sorted order, so
/// downstream consumers get deterministic iteration; re-validating the
/// output is a no-op. Anything else rejects with `datadoc-err-localized`.
pub fn is_localized_string(max_length: usize) -> Validator {
    let pattern = util::lang_code_pattern();
    Validator::new("is_localized_string", move |v, path, _doc| {
        if !v.is_missing() {
            if let Some(map) = v.value().as_object() {
                if util::is_localized_map(map, max_length, &pattern) {
                    let sorted: BTreeMap<String, Value> =
                        map.iter().map(|(k, val)| (k.clone(), val.clone())).collect();
                    let canonical: Map<String, Value> = sorted.into_iter().collect();
                    v.set_value(Value::Object(canonical));
                    v.mark_present();
                    return true;
                }
            }
        }
        v.error(keys::ERR_LOCALIZED, path, vec![]);
        false
    })
}

/// Dynamic type dispatch: the one controlled escape hatch letting a field's
/// declared type pick the validator for a later-processed field.
///
/// The value must be one of `"string"`, `"boolean"`, `"number"`,
/// `"localized"`. On match, the corresponding concrete validator is appended
/// to `builder` -- a chain owned by the document schema and executed against
/// a different field later in the same pass. Unrecognized names reject with
/// `datadoc-err-bad-type` and append nothing.
pub fn validate_data_type(builder: ChainBuilder) -> Validator {
    Validator::new("validate_data_type", move |v, path, _doc| {
        let concrete = match v.value().as_str() {
            Some("string") => Some(checks::is_string_line(DEFAULT_MAX_LINE_LENGTH)),
            Some("boolean") => Some(checks::is_bool()),
            Some("number") => Some(checks::is_number()),
            Some("localized") => Some(is_localized_string(DEFAULT_MAX_LINE_LENGTH)),
            _ => None,
        };
        match concrete {
            Some(validator) => {
                builder.push(validator);
                v.mark_present();
                true
            }
            None => {
                v.error(keys::ERR_BAD_TYPE, path, vec![]);
                false
            }
        }
    })
}
