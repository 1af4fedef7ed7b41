//! Driving port for employee mutations.
//!
//! Inbound adapters hand over the decoded request document untouched; the
//! implementation owns validation so every entry point applies the same
//! rules.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Employee, EmployeeError, EmployeeId};

/// Domain use-case port for creating, updating and deleting employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeCommand: Send + Sync {
    /// Validate `payload` as a complete record and store it.
    ///
    /// # Errors
    ///
    /// - [`EmployeeError::Validation`] when the payload is invalid.
    /// - [`EmployeeError::Conflict`] when the identifier is already taken.
    /// - [`EmployeeError::StoreUnavailable`] when the store fails.
    async fn create(&self, payload: Value) -> Result<Employee, EmployeeError>;

    /// Apply the fields present in `payload` to an existing record.
    ///
    /// An empty payload returns the current record unchanged.
    async fn update(&self, employee_id: &str, payload: Value) -> Result<Employee, EmployeeError>;

    /// Remove a record and return its identifier.
    async fn delete(&self, employee_id: &str) -> Result<EmployeeId, EmployeeError>;
}
