//! Employee record lifecycle service.
//!
//! [`EmployeeService`] implements the driving ports on top of an
//! [`EmployeeRepository`]. It validates input, enforces identifier
//! uniqueness, shapes pagination and translates store outcomes into
//! [`EmployeeError`]s. It holds no state between calls.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest, PageRequestError};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::domain::ports::{
    EmployeeCommand, EmployeeQuery, EmployeeRepository, EmployeeRepositoryError,
    ListEmployeesRequest, StoreHealth,
};
use crate::domain::validation::{
    FieldViolation, ValidationErrors, ViolationKind, parse_department_filter, validate_full,
    validate_partial,
};
use crate::domain::{Department, Employee, EmployeeError, EmployeeId};

/// Employee service implementing the driving ports.
#[derive(Clone)]
pub struct EmployeeService<R> {
    repository: Arc<R>,
}

impl<R> EmployeeService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> EmployeeService<R>
where
    R: EmployeeRepository,
{
    /// Identifiers that could never have been stored cannot match a record.
    fn lookup_key(employee_id: &str) -> Result<EmployeeId, EmployeeError> {
        EmployeeId::new(employee_id).map_err(|_| {
            warn!(employee_id, "employee not found");
            EmployeeError::not_found(employee_id)
        })
    }

    fn store_failure(operation: &'static str, err: EmployeeRepositoryError) -> EmployeeError {
        error!(operation, kind = err.kind(), error = %err, "employee store operation failed");
        EmployeeError::from(err)
    }

    fn rejected(errors: ValidationErrors) -> EmployeeError {
        warn!(%errors, "employee request rejected");
        EmployeeError::Validation(errors)
    }

    fn not_found(employee_id: &EmployeeId) -> EmployeeError {
        warn!(%employee_id, "employee not found");
        EmployeeError::not_found(employee_id.clone())
    }

    fn page_violation(err: PageRequestError) -> FieldViolation {
        let kind = match err {
            PageRequestError::PageTooSmall { min, .. }
            | PageRequestError::LimitTooSmall { min, .. } => ViolationKind::GreaterThanEqual { min },
            PageRequestError::LimitTooLarge { max, .. } => ViolationKind::LessThanEqual { max },
        };
        FieldViolation::new(err.field(), kind, Some(json!(err.value())))
    }

    fn list_parameters(
        request: &ListEmployeesRequest,
    ) -> Result<(PageRequest, Option<Department>), ValidationErrors> {
        let mut violations = Vec::new();
        let page = PageRequest::try_new(request.page, request.limit)
            .map_err(|errors| {
                violations.extend(errors.into_vec().into_iter().map(Self::page_violation));
            })
            .ok();
        let department = parse_department_filter(request.department.as_deref())
            .map_err(|errors| violations.extend(errors.into_violations()))
            .ok()
            .flatten();

        match page {
            Some(page) if violations.is_empty() => Ok((page, department)),
            _ => Err(ValidationErrors::new(violations)),
        }
    }
}

#[async_trait]
impl<R> EmployeeCommand for EmployeeService<R>
where
    R: EmployeeRepository,
{
    async fn create(&self, payload: Value) -> Result<Employee, EmployeeError> {
        let employee = validate_full(&payload).map_err(Self::rejected)?;
        let employee_id = employee.employee_id().clone();
        info!(%employee_id, "creating employee");

        let taken = self
            .repository
            .exists(&employee_id)
            .await
            .map_err(|err| Self::store_failure("exists", err))?;
        if taken {
            warn!(%employee_id, "duplicate employee id rejected");
            return Err(EmployeeError::conflict(employee_id));
        }

        // A concurrent create can win between the check and the insert; the
        // store's unique key turns that race into DuplicateKey.
        match self.repository.insert(&employee).await {
            Ok(stored) => {
                info!(%employee_id, "employee created");
                Ok(stored)
            }
            Err(EmployeeRepositoryError::DuplicateKey { .. }) => {
                warn!(%employee_id, "duplicate employee id rejected by store");
                Err(EmployeeError::conflict(employee_id))
            }
            Err(err) => Err(Self::store_failure("insert", err)),
        }
    }

    async fn update(&self, employee_id: &str, payload: Value) -> Result<Employee, EmployeeError> {
        let patch = validate_partial(&payload).map_err(Self::rejected)?;
        let key = Self::lookup_key(employee_id)?;
        info!(employee_id = %key, "updating employee");

        let updated = if patch.is_empty() {
            self.repository
                .find_by_key(&key)
                .await
                .map_err(|err| Self::store_failure("find_by_key", err))?
        } else {
            self.repository
                .update_by_key(&key, &patch)
                .await
                .map_err(|err| Self::store_failure("update_by_key", err))?
        };

        let employee = updated.ok_or_else(|| Self::not_found(&key))?;
        info!(employee_id = %key, "employee updated");
        Ok(employee)
    }

    async fn delete(&self, employee_id: &str) -> Result<EmployeeId, EmployeeError> {
        let key = Self::lookup_key(employee_id)?;
        info!(employee_id = %key, "deleting employee");

        let removed = self
            .repository
            .delete_by_key(&key)
            .await
            .map_err(|err| Self::store_failure("delete_by_key", err))?;
        if !removed {
            return Err(Self::not_found(&key));
        }
        info!(employee_id = %key, "employee deleted");
        Ok(key)
    }
}

#[async_trait]
impl<R> EmployeeQuery for EmployeeService<R>
where
    R: EmployeeRepository,
{
    async fn get(&self, employee_id: &str) -> Result<Employee, EmployeeError> {
        let key = Self::lookup_key(employee_id)?;
        self.repository
            .find_by_key(&key)
            .await
            .map_err(|err| Self::store_failure("find_by_key", err))?
            .ok_or_else(|| Self::not_found(&key))
    }

    async fn list(&self, request: ListEmployeesRequest) -> Result<Page<Employee>, EmployeeError> {
        let (page, department) = Self::list_parameters(&request).map_err(Self::rejected)?;
        let slice = self
            .repository
            .query(department, page.offset(), page.limit())
            .await
            .map_err(|err| Self::store_failure("query", err))?;
        info!(
            page = page.page(),
            limit = page.limit(),
            department = department.map(Department::as_str),
            returned = slice.employees.len(),
            total_count = slice.total_count,
            "listed employees"
        );
        Ok(Page::new(page, slice.total_count, slice.employees))
    }

    fn list_departments(&self) -> Vec<Department> {
        Department::ALL.to_vec()
    }
}

#[async_trait]
impl<R> StoreHealth for EmployeeService<R>
where
    R: EmployeeRepository,
{
    async fn check_store(&self) -> Result<(), EmployeeError> {
        self.repository
            .ping()
            .await
            .map_err(|err| Self::store_failure("ping", err))
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;
