use serde::Serialize;
use thiserror::Error;

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised while validating catalog input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Validation failed: {}", join_violations(.0))]
    Invalid(Vec<Violation>),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Returns the collected violations, empty for non field errors.
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationError::Invalid(violations) => violations,
            ValidationError::PasswordMismatch => &[],
        }
    }

    /// Turns a violation list into a result.
    pub fn check(violations: Vec<Violation>) -> Result<(), ValidationError> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(violations))
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::Invalid(vec![
            Violation::new("title", "must be at least 2 characters"),
            Violation::new("releaseDate", "is required"),
        ]);
        assert_eq!(
            error.to_string(),
            "Validation failed: title: must be at least 2 characters; releaseDate: is required"
        );
        assert_eq!(error.violations().len(), 2);
    }

    #[test]
    fn test_password_mismatch_display() {
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
        assert!(ValidationError::PasswordMismatch.violations().is_empty());
    }

    #[test]
    fn test_check_empty_is_ok() {
        assert_eq!(ValidationError::check(vec![]), Ok(()));
    }
}
