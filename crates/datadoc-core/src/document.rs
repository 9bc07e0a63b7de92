//! Document-level validation
//!
//! A [`DocumentSchema`] declares which fields a document kind recognizes and
//! which validator chain each field runs. [`DocumentValidator`] drives the
//! chains over a raw parsed tree and produces a [`ValidatedDocument`]: the
//! normalized data plus the per-field validation record and every
//! accumulated error. One field's failure never stops its siblings; chain
//! aborts are local to the field.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use crate::config::Config;
use crate::error::Result;
use crate::path::Path;
use crate::validators::{self, keys, Chain};
use crate::value::{FieldError, FieldValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// How much work a validation run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Run every declared chain and reject unknown fields
    Thorough,
    /// Skip all rules: the input is previously validated content being
    /// re-served, and re-checking it would be wasted work
    Trusted,
}

/// One declared field: its name and the chain it must pass.
#[derive(Debug)]
pub struct FieldRule {
    pub name: String,
    pub chain: Chain,
}

impl FieldRule {
    pub fn new<N: Into<String>>(name: N, chain: Chain) -> Self {
        Self {
            name: name.into(),
            chain,
        }
    }
}

/// A document kind: which fields exist and what rules they run.
///
/// Rules are rebuilt per validation run, so chain configuration binds at
/// construction time and shared [`crate::validators::ChainBuilder`] state
/// never leaks across runs. Declaration order is execution order; a rule
/// whose chain feeds a `ChainBuilder` must precede the rule that executes
/// the built chain.
pub trait DocumentSchema {
    /// Declared fields in execution order.
    fn field_rules(&self, config: &Config) -> Vec<FieldRule>;

    /// Whether documents of this kind can be projected into a localized
    /// view. Explicit capability flag; consumers must not probe shapes.
    fn supports_localization(&self) -> bool {
        false
    }
}

/// The outcome of validating one document.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedDocument {
    data: Value,
    fields: BTreeMap<String, FieldValue>,
    errors: Vec<FieldError>,
    localizable: bool,
}

impl ValidatedDocument {
    /// A document is valid iff no field accumulated any error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The normalized tree: transforms applied, deleted and invalid fields
    /// removed.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    /// Per-field validation record, including fields that ended up deleted
    /// or invalid.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Every accumulated error, in document order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn supports_localization(&self) -> bool {
        self.localizable
    }
}

/// Drives field chains over raw documents.
pub struct DocumentValidator<'a> {
    config: &'a Config,
}

impl<'a> DocumentValidator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Validate `raw` against `schema`.
    ///
    /// In [`ValidationMode::Trusted`] the input is accepted verbatim. In
    /// [`ValidationMode::Thorough`] the root must be an object; each
    /// declared field is wrapped in a [`FieldValue`] (MISSING when absent)
    /// and run through its chain. Fields still MISSING afterwards are
    /// dropped from the normalized tree, as are fields that accumulated
    /// errors and keys the schema does not declare.
    pub fn validate(
        &self,
        schema: &dyn DocumentSchema,
        raw: &Value,
        mode: ValidationMode,
    ) -> ValidatedDocument {
        if mode == ValidationMode::Trusted {
            return ValidatedDocument {
                data: raw.clone(),
                fields: BTreeMap::new(),
                errors: Vec::new(),
                localizable: schema.supports_localization(),
            };
        }

        let mut errors = Vec::new();

        let root = match raw.as_object() {
            Some(root) => root,
            None => {
                errors.push(FieldError::new(keys::ERR_ROOT, Path::root(), vec![]));
                return ValidatedDocument {
                    data: Value::Object(Map::new()),
                    fields: BTreeMap::new(),
                    errors,
                    localizable: schema.supports_localization(),
                };
            }
        };

        let rules = schema.field_rules(self.config);
        let declared: BTreeSet<&str> = rules.iter().map(|r| r.name.as_str()).collect();

        let mut normalized = Map::new();
        let mut fields = BTreeMap::new();

        for rule in &rules {
            let path = Path::field(&rule.name);
            let mut value = match root.get(&rule.name) {
                Some(present) => FieldValue::new(present.clone()),
                None => FieldValue::missing(),
            };

            validators::run(&rule.chain, &mut value, &path, raw);

            errors.extend(value.errors().iter().cloned());
            if !value.is_missing() && !value.has_errors() {
                normalized.insert(rule.name.clone(), value.value().clone());
            }
            fields.insert(rule.name.clone(), value);
        }

        for key in root.keys() {
            if !declared.contains(key.as_str()) {
                errors.push(FieldError::new(
                    keys::ERR_UNEXPECTED_KEY,
                    Path::field(key),
                    vec![],
                ));
            }
        }

        ValidatedDocument {
            data: Value::Object(normalized),
            fields,
            errors,
            localizable: schema.supports_localization(),
        }
    }

    /// Parse `raw` as JSON, then validate. Parse failures are operational
    /// errors, not field errors: there is no document to attach them to.
    pub fn validate_str(
        &self,
        schema: &dyn DocumentSchema,
        raw: &str,
        mode: ValidationMode,
    ) -> Result<ValidatedDocument> {
        let parsed: Value = serde_json::from_str(raw)?;
        Ok(self.validate(schema, &parsed, mode))
    }
}
