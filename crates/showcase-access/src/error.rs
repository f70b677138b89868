//! Error types for access control
//!
//! Denial is never an error inside the engine: `decide` returns `false` and
//! `project` omits fields. These types exist for callers that want to
//! propagate a rejected update with `?`, and for rule configuration loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Access error types surfaced to API layers.
#[derive(Debug, Error)]
pub enum AccessError {
    /// One or more fields of an update were rejected
    #[error("Forbidden: permission denied for {} field(s)", .errors.len())]
    Forbidden {
        /// Every rejected field.
        errors: Vec<ValidationError>,
    },
}

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::Forbidden { .. } => 403,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::Forbidden { .. } => "FIELD_ACCESS_DENIED",
        }
    }

    /// Field errors carried by this error.
    pub fn field_errors(&self) -> &[ValidationError] {
        match self {
            AccessError::Forbidden { errors } => errors,
        }
    }
}

/// Rule configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Rule file could not be read
    #[error("Failed to read rule file {}: {}", .path.display(), .source)]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Rule document is not valid JSON or has the wrong shape
    #[error("Invalid rule document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rule references a condition that does not exist
    #[error("Unknown condition '{condition}' for {kind}.{field}")]
    UnknownCondition {
        /// Resource kind of the offending rule.
        kind: String,
        /// Field of the offending rule.
        field: String,
        /// The unresolved condition name.
        condition: String,
    },

    /// Rule has an empty field name
    #[error("Rule for {0} has an empty field name")]
    EmptyField(String),
}

impl ConfigError {
    /// Get error code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "RULES_IO",
            ConfigError::Parse(_) => "RULES_PARSE",
            ConfigError::UnknownCondition { .. } => "RULES_UNKNOWN_CONDITION",
            ConfigError::EmptyField(_) => "RULES_EMPTY_FIELD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_error() {
        let err = AccessError::Forbidden {
            errors: vec![
                ValidationError::permission_denied("title"),
                ValidationError::permission_denied("grade"),
            ],
        };

        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FIELD_ACCESS_DENIED");
        assert_eq!(err.field_errors().len(), 2);
        assert_eq!(err.to_string(), "Forbidden: permission denied for 2 field(s)");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnknownCondition {
            kind: "submission".to_string(),
            field: "title".to_string(),
            condition: "sometimes".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown condition 'sometimes' for submission.title");
        assert_eq!(err.error_code(), "RULES_UNKNOWN_CONDITION");
    }
}
