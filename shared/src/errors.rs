//! Error types for the study planner domain

use crate::validation::ValidationError;
use thiserror::Error;

/// Domain-wide error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {}", .0.user_message())]
    Validation(ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: &str, message: &str) -> Self {
        DomainError::Validation(ValidationError::new(field, message))
    }

    /// True for construction-time invariant violations
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::Validation(err)
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = DomainError::validation("concentration", "must be between 0 and 1");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: Concentration: must be between 0 and 1"
        );
    }

    #[test]
    fn test_not_found_is_not_validation() {
        let err = DomainError::NotFound("session".to_string());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Not found: session");
    }
}
