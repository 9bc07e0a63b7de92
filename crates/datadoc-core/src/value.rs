//! Per-field value wrapper with status tracking and error accumulation
//!
//! A [`FieldValue`] carries one field's raw content through a validator
//! chain. Validators mutate it in place: they may rewrite the content, move
//! the status, or append [`FieldError`] descriptors. The wrapper itself never
//! interprets the content.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use crate::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Validation status of a field, independent of its error state.
///
/// `Missing` doubles as the deletion sentinel: a field whose status is still
/// `Missing` after its chain ran is removed from the normalized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Not yet inspected by any validator
    Unknown,
    /// Absent from the document, or marked for deletion
    Missing,
    /// Substituted from a configured default
    Default,
    /// Inspected and present
    Present,
}

/// Structured, localizable error descriptor.
///
/// `key` is a stable message identifier and `args` are positional message
/// arguments; rendering them into human-readable text is the caller's
/// message-formatting concern. The `Display` impl is a mechanical fallback
/// for logs and test output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Stable message key, e.g. `datadoc-err-bool`
    pub key: String,
    /// Location of the offending field
    pub path: Path,
    /// Positional message arguments
    pub args: Vec<Value>,
}

impl FieldError {
    pub fn new<K: Into<String>>(key: K, path: Path, args: Vec<Value>) -> Self {
        Self {
            key: key.into(),
            path,
            args,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.key, self.path)?;
        if !self.args.is_empty() {
            let rendered: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
            write!(f, " ({})", rendered.join(", "))?;
        }
        Ok(())
    }
}

/// One field's value, status, and accumulated errors during validation.
///
/// Created fresh per field for every validation run and discarded once the
/// results are merged into the document.
#[derive(Debug, Clone, Serialize)]
pub struct FieldValue {
    raw: Value,
    status: Status,
    errors: Vec<FieldError>,
}

impl FieldValue {
    /// Wrap a value present in the document.
    pub fn new(raw: Value) -> Self {
        Self {
            raw,
            status: Status::Unknown,
            errors: Vec::new(),
        }
    }

    /// A field absent from the document. The raw content is `null`.
    pub fn missing() -> Self {
        Self {
            raw: Value::Null,
            status: Status::Missing,
            errors: Vec::new(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.raw
    }

    /// Replace the raw content. Status and errors are left untouched.
    pub fn set_value(&mut self, raw: Value) {
        self.raw = raw;
    }

    pub fn into_value(self) -> Value {
        self.raw
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn is_missing(&self) -> bool {
        self.status == Status::Missing
    }

    /// True when the content was substituted from a default rule.
    pub fn defaulted(&self) -> bool {
        self.status == Status::Default
    }

    /// Promote `Unknown` to `Present`. Called by accepting validators so
    /// consumers can tell an inspected field from an untouched one. Any
    /// other status is preserved.
    pub fn mark_present(&mut self) {
        if self.status == Status::Unknown {
            self.status = Status::Present;
        }
    }

    /// Append an error descriptor. Insertion order is preserved; the status
    /// is not changed.
    pub fn error<K: Into<String>>(&mut self, key: K, path: &Path, args: Vec<Value>) {
        self.errors.push(FieldError::new(key, path.clone(), args));
    }

    /// A field with at least one error is invalid regardless of status.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_value_starts_unknown() {
        let v = FieldValue::new(json!("x"));
        assert_eq!(v.status(), Status::Unknown);
        assert!(!v.is_missing());
        assert!(!v.has_errors());
    }

    #[test]
    fn test_missing_value() {
        let v = FieldValue::missing();
        assert!(v.is_missing());
        assert_eq!(*v.value(), Value::Null);
    }

    #[test]
    fn test_set_value_keeps_status_and_errors() {
        let mut v = FieldValue::new(json!(1));
        v.error("datadoc-err-test", &Path::field("a"), vec![]);
        v.set_status(Status::Missing);
        v.set_value(json!(2));
        assert_eq!(v.status(), Status::Missing);
        assert_eq!(v.errors().len(), 1);
        assert_eq!(*v.value(), json!(2));
    }

    #[test]
    fn test_errors_preserve_insertion_order() {
        let mut v = FieldValue::new(json!(1));
        let path = Path::field("a");
        v.error("first", &path, vec![]);
        v.error("second", &path, vec![json!(3)]);
        let keys: Vec<&str> = v.errors().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second"]);
    }

    #[test]
    fn test_mark_present_only_promotes_unknown() {
        let mut v = FieldValue::new(json!(1));
        v.mark_present();
        assert_eq!(v.status(), Status::Present);

        let mut m = FieldValue::missing();
        m.mark_present();
        assert_eq!(m.status(), Status::Missing);

        let mut d = FieldValue::new(json!(1));
        d.set_status(Status::Default);
        d.mark_present();
        assert_eq!(d.status(), Status::Default);
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new(
            "datadoc-err-array-count",
            Path::field("coordinates"),
            vec![json!(2), json!(3), json!("coordinates")],
        );
        let rendered = err.to_string();
        assert!(rendered.contains("datadoc-err-array-count"));
        assert!(rendered.contains("$.coordinates"));
        assert!(rendered.contains('2'));
    }
}
