//! Outcomes the employee service reports to its callers.

use serde_json::json;

use super::ports::EmployeeRepositoryError;
use super::validation::ValidationErrors;
use super::{Error, ErrorCode};

/// Recoverable failures of employee operations.
///
/// Each variant maps to exactly one [`ErrorCode`]; nothing is downgraded or
/// retried on the way out.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmployeeError {
    /// Input failed validation and never reached the store.
    #[error("{0}")]
    Validation(ValidationErrors),
    /// An employee with this identifier already exists.
    #[error("employee with ID '{employee_id}' already exists")]
    Conflict { employee_id: String },
    /// No employee has this identifier.
    #[error("employee with ID '{employee_id}' not found")]
    NotFound { employee_id: String },
    /// The record store failed or timed out.
    #[error("record store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl EmployeeError {
    /// Build a [`EmployeeError::Conflict`].
    pub fn conflict(employee_id: impl Into<String>) -> Self {
        Self::Conflict {
            employee_id: employee_id.into(),
        }
    }

    /// Build a [`EmployeeError::NotFound`].
    pub fn not_found(employee_id: impl Into<String>) -> Self {
        Self::NotFound {
            employee_id: employee_id.into(),
        }
    }

    /// Stable error code for transport adapters.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::StoreUnavailable { .. } => ErrorCode::ServiceUnavailable,
        }
    }
}

impl From<ValidationErrors> for EmployeeError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<EmployeeRepositoryError> for EmployeeError {
    fn from(error: EmployeeRepositoryError) -> Self {
        match error {
            EmployeeRepositoryError::DuplicateKey { employee_id } => Self::conflict(employee_id),
            other => Self::StoreUnavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<EmployeeError> for Error {
    fn from(error: EmployeeError) -> Self {
        let message = error.to_string();
        let code = error.code();
        match error {
            EmployeeError::Validation(errors) => {
                Error::new(code, message).with_details(errors.to_details())
            }
            EmployeeError::Conflict { employee_id } | EmployeeError::NotFound { employee_id } => {
                Error::new(code, message).with_details(json!({ "employee_id": employee_id }))
            }
            EmployeeError::StoreUnavailable { .. } => {
                Error::new(code, "record store unavailable")
            }
        }
    }
}
