//! Process-local `EmployeeRepository`.
//!
//! Records live in an insertion-ordered vector behind a single mutex. The
//! duplicate check and the push happen under the same lock, so concurrent
//! inserts of one key yield exactly one success. Nothing survives a restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError, EmployeeSlice};
use crate::domain::{Department, Employee, EmployeeId, EmployeePatch};

/// In-memory implementation of the `EmployeeRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    records: Mutex<Vec<Employee>>,
}

impl InMemoryEmployeeRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<Employee>>, EmployeeRepositoryError> {
        self.records
            .lock()
            .map_err(|_| EmployeeRepositoryError::connection("in-memory store lock poisoned"))
    }
}

fn position(records: &[Employee], employee_id: &EmployeeId) -> Option<usize> {
    records
        .iter()
        .position(|employee| employee.employee_id() == employee_id)
}

fn usize_from(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn insert(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError> {
        let mut records = self.records()?;
        if position(&records, employee.employee_id()).is_some() {
            return Err(EmployeeRepositoryError::duplicate_key(
                employee.employee_id().as_ref(),
            ));
        }
        records.push(employee.clone());
        Ok(employee.clone())
    }

    async fn find_by_key(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let records = self.records()?;
        Ok(position(&records, employee_id).map(|index| records[index].clone()))
    }

    async fn exists(&self, employee_id: &EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        let records = self.records()?;
        Ok(position(&records, employee_id).is_some())
    }

    async fn update_by_key(
        &self,
        employee_id: &EmployeeId,
        patch: &EmployeePatch,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut records = self.records()?;
        let Some(slot) = records
            .iter_mut()
            .find(|employee| employee.employee_id() == employee_id)
        else {
            return Ok(None);
        };
        *slot = patch.apply_to(slot.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete_by_key(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<bool, EmployeeRepositoryError> {
        let mut records = self.records()?;
        match position(&records, employee_id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn query(
        &self,
        department: Option<Department>,
        skip: u64,
        take: u64,
    ) -> Result<EmployeeSlice, EmployeeRepositoryError> {
        let records = self.records()?;
        let matches = |employee: &&Employee| department.is_none_or(|d| employee.department() == d);
        let total_count = records.iter().filter(matches).count();
        let employees = records
            .iter()
            .filter(matches)
            .skip(usize_from(skip))
            .take(usize_from(take))
            .cloned()
            .collect();
        Ok(EmployeeSlice {
            employees,
            total_count: u64::try_from(total_count).unwrap_or(u64::MAX),
        })
    }

    async fn ping(&self) -> Result<(), EmployeeRepositoryError> {
        self.records().map(|_| ())
    }
}
