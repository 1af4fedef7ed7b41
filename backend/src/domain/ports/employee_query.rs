//! Driving port for employee reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Department, Employee, EmployeeError};

/// Raw listing parameters as received from the caller.
///
/// Values are range-checked by the implementation rather than clamped, so
/// callers see a validation error for out-of-range input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEmployeesRequest {
    pub page: i64,
    pub limit: i64,
    pub department: Option<String>,
}

impl Default for ListEmployeesRequest {
    fn default() -> Self {
        Self {
            page: pagination::DEFAULT_PAGE,
            limit: pagination::DEFAULT_LIMIT,
            department: None,
        }
    }
}

/// Domain use-case port for reading employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeQuery: Send + Sync {
    /// Fetch one record by identifier.
    async fn get(&self, employee_id: &str) -> Result<Employee, EmployeeError>;

    /// Fetch one page of records, optionally filtered by department.
    async fn list(&self, request: ListEmployeesRequest) -> Result<Page<Employee>, EmployeeError>;

    /// The closed department set in canonical order.
    fn list_departments(&self) -> Vec<Department>;
}
