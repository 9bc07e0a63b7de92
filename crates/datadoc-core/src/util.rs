//! Shared string and map predicates used by the validator library
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use regex::Regex;
use serde_json::{Map, Value};

/// Pattern for language codes accepted as localized-string keys:
/// a two or three letter primary subtag with optional lowercase
/// alphanumeric subtags (`en`, `pt-br`, `nan-hani`).
pub(crate) fn lang_code_pattern() -> Regex {
    Regex::new(r"^[a-z]{2,3}(-[a-z0-9]+)*$").expect("Valid regex pattern")
}

/// Pattern for header strings: a letter or underscore followed by
/// letters, digits, or underscores (Unicode classes).
pub(crate) fn header_string_pattern() -> Regex {
    Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").expect("Valid regex pattern")
}

/// A single-line string: no line breaks and at most `max_length` characters.
pub(crate) fn is_valid_line_string(value: &Value, max_length: usize) -> bool {
    match value.as_str() {
        Some(s) => {
            !s.contains('\n') && !s.contains('\r') && s.chars().count() <= max_length
        }
        None => false,
    }
}

/// True when `code` is shaped like a recognized language code. Matching is
/// case-insensitive; canonical form is lowercase.
pub(crate) fn is_valid_lang_code(code: &str, pattern: &Regex) -> bool {
    pattern.is_match(&code.to_ascii_lowercase())
}

/// A localized-string map: non-empty, every key a language code, every value
/// a single-line string.
pub(crate) fn is_localized_map(
    map: &Map<String, Value>,
    max_length: usize,
    pattern: &Regex,
) -> bool {
    !map.is_empty()
        && map.iter().all(|(key, value)| {
            is_valid_lang_code(key, pattern) && is_valid_line_string(value, max_length)
        })
}

/// True when every element of `list` is a string.
pub(crate) fn all_values_are_strings(list: &[Value]) -> bool {
    list.iter().all(Value::is_string)
}
