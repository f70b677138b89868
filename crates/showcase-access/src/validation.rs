//! # Update Validation
//!
//! Structured outcome of checking a proposed set of field changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AccessError, AccessResult};

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The rejected field name.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    /// Rejection for a field the caller may not write.
    pub fn permission_denied(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            message: format!("permission denied for field {field}"),
            field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of validating an update.
///
/// All-or-nothing for the caller (`is_valid`) but fully diagnostic: every
/// rejected field is listed, not only the first.
///
/// # Example
///
/// ```
/// use showcase_access::{UpdateValidation, ValidationError};
///
/// let ok = UpdateValidation::valid();
/// assert!(ok.is_valid);
///
/// let rejected = UpdateValidation::from_errors(vec![ValidationError::permission_denied("grade")]);
/// assert!(!rejected.is_valid);
/// assert_eq!(rejected.rejected_fields(), vec!["grade"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValidation {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    /// One entry per rejected field.
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

impl UpdateValidation {
    /// A passing validation.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a validation from collected errors.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Names of the rejected fields, in report order.
    pub fn rejected_fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Convert into a `Result` for callers that propagate with `?`.
    pub fn into_result(self) -> AccessResult<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(AccessError::Forbidden { errors: self.errors })
        }
    }
}

impl Default for UpdateValidation {
    fn default() -> Self {
        Self::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_message() {
        let err = ValidationError::permission_denied("title");
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "permission denied for field title");
        assert_eq!(err.to_string(), "title: permission denied for field title");
    }

    #[test]
    fn test_from_errors_sets_validity() {
        assert!(UpdateValidation::from_errors(Vec::new()).is_valid);
        assert!(UpdateValidation::default().is_valid);

        let validation = UpdateValidation::from_errors(vec![
            ValidationError::permission_denied("title"),
            ValidationError::permission_denied("grade"),
        ]);
        assert!(!validation.is_valid);
        assert_eq!(validation.rejected_fields(), vec!["title", "grade"]);
    }

    #[test]
    fn test_into_result() {
        assert!(UpdateValidation::valid().into_result().is_ok());

        let err = UpdateValidation::from_errors(vec![ValidationError::permission_denied("grade")])
            .into_result()
            .unwrap_err();
        match err {
            AccessError::Forbidden { errors } => assert_eq!(errors.len(), 1),
        }
    }

    #[test]
    fn test_serializes_for_api_responses() {
        let validation = UpdateValidation::from_errors(vec![ValidationError::permission_denied("grade")]);
        let json = serde_json::to_value(&validation).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0]["field"], "grade");
    }
}
