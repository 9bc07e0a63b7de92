//! Predicate validators: type and format checks
//!
//! Every constructor returns a [`Validator`] that appends exactly one error
//! and returns `false` on reject, and promotes the field to `Present` on
//! accept. Checks are idempotent: re-running an accepting check adds no
//! errors and never rewrites the value.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use super::{keys, Validator};
use crate::util;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use url::Url;

/// The value must be a boolean.
pub fn is_bool() -> Validator {
    Validator::new("is_bool", |v, path, _doc| {
        if !v.value().is_boolean() {
            v.error(keys::ERR_BOOL, path, vec![]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The value must be a string.
pub fn is_string() -> Validator {
    Validator::new("is_string", |v, path, _doc| {
        if !v.value().is_string() {
            v.error(keys::ERR_STRING, path, vec![]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The value must be a single-line string of at most `max_length` characters.
pub fn is_string_line(max_length: usize) -> Validator {
    Validator::new("is_string_line", move |v, path, _doc| {
        if !util::is_valid_line_string(v.value(), max_length) {
            v.error(keys::ERR_STRINGLINE, path, vec![json!(max_length)]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The value must be an integer. JSON numbers carry no integer tag, so a
/// number counts as an integer iff it is representable as `i64` or `u64`
/// without a fractional part (`1.0` is a number, not an integer).
pub fn is_int() -> Validator {
    Validator::new("is_int", |v, path, _doc| {
        let ok = match v.value().as_number() {
            Some(n) => n.is_i64() || n.is_u64(),
            None => false,
        };
        if !ok {
            v.error(keys::ERR_INTEGER, path, vec![]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The value must be a number (integer or float).
pub fn is_number() -> Validator {
    Validator::new("is_number", |v, path, _doc| {
        if !v.value().is_number() {
            v.error(keys::ERR_NUMBER, path, vec![]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The value must be an ordered sequence (JSON array).
pub fn is_list() -> Validator {
    Validator::new("is_list", |v, path, _doc| {
        if !v.value().is_array() {
            v.error(keys::ERR_ARRAY, path, vec![]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The value must be a map (JSON object).
pub fn is_dictionary() -> Validator {
    Validator::new("is_dictionary", |v, path, _doc| {
        if !v.value().is_object() {
            v.error(keys::ERR_ASSOC_ARRAY, path, vec![]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The value must be a string parsing as a well-formed URL.
pub fn is_url() -> Validator {
    Validator::new("is_url", |v, path, _doc| {
        let ok = v
            .value()
            .as_str()
            .map(|s| Url::parse(s).is_ok())
            .unwrap_or(false);
        if !ok {
            v.error(keys::ERR_URL, path, vec![]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The value must be a header string: a letter or underscore followed by
/// letters, digits, or underscores (Unicode letter classes).
pub fn is_header_string() -> Validator {
    let pattern = util::header_string_pattern();
    Validator::new("is_header_string", move |v, path, _doc| {
        let ok = v
            .value()
            .as_str()
            .map(|s| pattern.is_match(s))
            .unwrap_or(false);
        if !ok {
            v.error(keys::ERR_BAD_HEADER_STRING, path, vec![]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// A list value must contain no duplicate string elements. Non-list values
/// pass through unchecked so the check composes after coercions.
pub fn list_has_unique_strings() -> Validator {
    Validator::new("list_has_unique_strings", |v, path, _doc| {
        if let Some(items) = v.value().as_array() {
            let strings: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            let unique: BTreeSet<&str> = strings.iter().copied().collect();
            if unique.len() != strings.len() {
                v.error(keys::ERR_UNIQUE_STRINGS, path, vec![]);
                return false;
            }
        }
        v.mark_present();
        true
    })
}

/// A list value must have exactly `count` elements. The error reports the
/// actual size, the expected size, and `field` as a display label.
pub fn check_list_size<F: Into<String>>(count: usize, field: F) -> Validator {
    let field = field.into();
    Validator::new("check_list_size", move |v, path, _doc| {
        let actual = v.value().as_array().map(|items| items.len());
        if let Some(actual) = actual {
            if actual != count {
                v.error(
                    keys::ERR_ARRAY_COUNT,
                    path,
                    vec![json!(actual), json!(count), json!(field)],
                );
                return false;
            }
        }
        v.mark_present();
        true
    })
}

/// The value must be one of the allowed license codes. The error carries the
/// allowed set as a comma-separated list for display.
pub fn is_valid_license(allowed: Vec<String>) -> Validator {
    Validator::new("is_valid_license", move |v, path, _doc| {
        let ok = v
            .value()
            .as_str()
            .map(|s| allowed.iter().any(|a| a == s))
            .unwrap_or(false);
        if !ok {
            v.error(keys::ERR_LICENSE, path, vec![json!(allowed.join(", "))]);
            return false;
        }
        v.mark_present();
        true
    })
}

/// The field must be present: rejects a MISSING value with
/// `datadoc-err-required`. Place ahead of type checks in chains for
/// required fields so absence reports as absence, not as a type mismatch.
pub fn required() -> Validator {
    Validator::new("required", |v, path, _doc| {
        if v.is_missing() {
            v.error(keys::ERR_REQUIRED, path, vec![]);
            return false;
        }
        true
    })
}
