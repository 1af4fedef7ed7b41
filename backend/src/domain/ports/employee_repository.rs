//! Driven port for employee record storage.
//!
//! Adapters store flat employee records keyed by `employee_id` and return
//! them in insertion order. The store alone enforces key uniqueness; a
//! unique violation detected during [`EmployeeRepository::insert`] must be
//! reported as [`EmployeeRepositoryError::DuplicateKey`].

use async_trait::async_trait;

use crate::domain::{Department, Employee, EmployeeId, EmployeePatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// The store could not be reached, or an operation timed out.
        Connection { message: String } => "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "employee repository query failed: {message}",
        /// Insert collided with an existing business key.
        DuplicateKey { employee_id: String } => "employee {employee_id} already stored",
    }
}

/// One page of a filtered listing plus the size of the whole filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeSlice {
    pub employees: Vec<Employee>,
    pub total_count: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Store a new record and return it as persisted.
    async fn insert(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError>;

    /// Fetch a record by business key.
    async fn find_by_key(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Whether a record with this key exists.
    async fn exists(&self, employee_id: &EmployeeId) -> Result<bool, EmployeeRepositoryError>;

    /// Apply `patch` to a stored record and return the result, or `None` if
    /// no record has this key.
    async fn update_by_key(
        &self,
        employee_id: &EmployeeId,
        patch: &EmployeePatch,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Remove a record; `false` when nothing matched.
    async fn delete_by_key(&self, employee_id: &EmployeeId)
    -> Result<bool, EmployeeRepositoryError>;

    /// Return up to `take` records after skipping `skip`, in insertion order,
    /// together with the total number of records matching `department`.
    async fn query(
        &self,
        department: Option<Department>,
        skip: u64,
        take: u64,
    ) -> Result<EmployeeSlice, EmployeeRepositoryError>;

    /// Round-trip to the store to confirm it is reachable.
    async fn ping(&self) -> Result<(), EmployeeRepositoryError>;
}
