//! Operational error types for the datadoc core library
//!
//! These cover failures of the machinery itself: bad configuration, input
//! that is not JSON at all. Field-level diagnostics are not errors in this
//! sense -- they travel as [`crate::FieldError`] values inside the validated
//! document, never as `Err` (validators communicate failure solely through
//! their boolean return and the error list side channel).
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use thiserror::Error;

/// Main error type for datadoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = Error::Configuration {
            message: "allowed license has no registry entry".to_string(),
            source: None,
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: allowed license has no registry entry"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
