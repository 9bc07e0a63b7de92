//! The standard data-document kind
//!
//! [`DataSchema`] declares the field rules every data document shares:
//! a required `license` code, an optional localized `description`, and an
//! optional `sources` attribution string. Documents of this kind support
//! the localized projection.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use crate::config::Config;
use crate::document::{DocumentSchema, DocumentValidator, FieldRule, ValidatedDocument, ValidationMode};
use crate::validators::{
    is_localized_string, is_string, is_string_line, is_valid_license, required, use_default,
};
use serde_json::{json, Value};

/// Field rules for data documents: `license`, `description`, `sources`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataSchema;

impl DocumentSchema for DataSchema {
    fn field_rules(&self, config: &Config) -> Vec<FieldRule> {
        vec![
            FieldRule::new(
                "license",
                vec![
                    required(),
                    is_string_line(config.max_line_length),
                    is_valid_license(config.allowed_licenses.clone()),
                ],
            ),
            FieldRule::new(
                "description",
                vec![
                    use_default(json!({"en": ""}), false),
                    is_localized_string(config.max_line_length),
                ],
            ),
            FieldRule::new(
                "sources",
                vec![use_default(json!(""), false), is_string()],
            ),
        ]
    }

    fn supports_localization(&self) -> bool {
        true
    }
}

/// Validate a raw tree as a data document.
pub fn validate_data_document(
    config: &Config,
    raw: &Value,
    mode: ValidationMode,
) -> ValidatedDocument {
    DocumentValidator::new(config).validate(&DataSchema, raw, mode)
}
