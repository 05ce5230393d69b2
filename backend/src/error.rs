//! Service error handling
//!
//! Domain, validation and repository failures are folded into one error
//! type so services can use `?` across all of them.

use crate::repositories::RepositoryError;
use serde::Serialize;
use study_planner_shared::validation::get_missing_fields_labels;
use study_planner_shared::DomainError;
use thiserror::Error;
use tracing::error;

/// Error returned by every service operation
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Serializable error summary for reports
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Summary safe to print; internal causes are logged, not exposed
    pub fn detail(&self) -> ErrorDetail {
        let message = match self {
            ServiceError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        ErrorDetail {
            code: self.code().to_string(),
            message,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(v) => ServiceError::Validation(v.user_message()),
            DomainError::NotFound(msg) => ServiceError::NotFound(msg),
            DomainError::Conflict(msg) => ServiceError::Conflict(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ServiceError::Validation(format!(
            "Invalid fields: {}",
            get_missing_fields_labels(&fields).join(", ")
        ))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ServiceError::NotFound(err.to_string()),
            RepositoryError::Conflict { .. } => ServiceError::Conflict(err.to_string()),
            RepositoryError::Storage(inner) => ServiceError::Internal(inner),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
