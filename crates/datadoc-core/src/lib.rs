//! Datadoc Core - validation engine and localized views for JSON data documents
//!
//! This crate validates and normalizes JSON-like document trees against
//! per-field validator chains, producing either a sanitized document or a
//! structured list of path-addressed errors, and projects a validated
//! document into a language-specific view for display or programmatic
//! consumption.
//!
//! # Main Components
//!
//! - **Field values**: [`FieldValue`] wraps one field's content with a
//!   status tag and an append-only error list
//! - **Validator chains**: ordered lists of reusable validators executed
//!   with first-`false` short-circuiting ([`validators`])
//! - **Document validation**: [`DocumentValidator`] drives the chains a
//!   [`DocumentSchema`] declares over a whole tree
//! - **Localization**: fallback-chain string resolution and license display
//!   data ([`localize`])
//!
//! # Example
//!
//! ```rust
//! use datadoc_core::{validate_data_document, Config, ValidationMode};
//! use serde_json::json;
//!
//! let config = Config::default();
//! let doc = validate_data_document(
//!     &config,
//!     &json!({
//!         "license": "cc-by-4.0+",
//!         "description": {"en": "City population counts", "fr": "Population des villes"}
//!     }),
//!     ValidationMode::Thorough,
//! );
//! assert!(doc.is_valid());
//!
//! let view = doc.localized("fr", &config).unwrap();
//! assert_eq!(view.description.as_deref(), Some("Population des villes"));
//! ```
//!
//! Validation never throws across the chain boundary: validators report
//! failure through their boolean return and the per-field error list, so
//! outcomes are fully inspectable. Operational failures (bad configuration,
//! unparseable input) use [`Error`].
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod localize;
pub mod path;
pub mod validators;
pub mod value;

mod util;

// Re-export main types for convenience
pub use config::{Config, LicenseEntry, LicenseRegistry, LocaleConfig, DEFAULT_MAX_LINE_LENGTH};
pub use content::{validate_data_document, DataSchema};
pub use document::{
    DocumentSchema, DocumentValidator, FieldRule, ValidatedDocument, ValidationMode,
};
pub use error::{Error, Result};
pub use localize::{
    localized_data, pick_localized_string, project, DataView, LangTarget, LicenseCode,
    LocalizedData, LocalizedLicense,
};
pub use path::{Path, PathSegment};
pub use validators::{Chain, ChainBuilder, Validator};
pub use value::{FieldError, FieldValue, Status};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }
}
