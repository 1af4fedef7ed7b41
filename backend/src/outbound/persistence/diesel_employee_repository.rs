//! PostgreSQL-backed `EmployeeRepository` implementation using Diesel ORM.
//!
//! Records are listed in insertion order via the `created_seq` column. Every
//! operation, including pool checkout, runs under a per-operation timeout;
//! an elapsed timeout is reported as a connection error.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError, EmployeeSlice};
use crate::domain::{Department, Employee, EmployeeId, EmployeePatch};

use super::models::{EmployeeChangeset, EmployeeRow, NewEmployeeRow};
use super::pool::{DbPool, PoolError};
use super::schema::employees;

/// Default bound on a single store operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Diesel-backed implementation of the `EmployeeRepository` port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
    operation_timeout: Duration,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Override the per-operation timeout.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }
}

fn map_pool_error(error: PoolError) -> EmployeeRepositoryError {
    EmployeeRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: DieselError) -> EmployeeRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => EmployeeRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => EmployeeRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            EmployeeRepositoryError::connection("database connection error")
        }
        _ => EmployeeRepositoryError::query("database error"),
    }
}

fn map_insert_error(error: DieselError, employee_id: &EmployeeId) -> EmployeeRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            EmployeeRepositoryError::duplicate_key(employee_id.as_ref())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_employee(row: EmployeeRow) -> Result<Employee, EmployeeRepositoryError> {
    Employee::try_from(row).map_err(EmployeeRepositoryError::query)
}

fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn from_sql_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// Run `operation` under `timeout`, treating expiry as a connection failure.
async fn bounded<T, F>(
    timeout: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, EmployeeRepositoryError>
where
    F: Future<Output = Result<T, EmployeeRepositoryError>>,
{
    tokio::time::timeout(timeout, fut).await.unwrap_or_else(|_| {
        warn!(
            operation,
            timeout_ms = timeout.as_millis(),
            "employee store operation timed out"
        );
        Err(EmployeeRepositoryError::connection(format!(
            "{operation} timed out after {}ms",
            timeout.as_millis()
        )))
    })
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn insert(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError> {
        bounded(self.operation_timeout, "insert", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = diesel::insert_into(employees::table)
                .values(NewEmployeeRow::from(employee))
                .returning(EmployeeRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|err| map_insert_error(err, employee.employee_id()))?;
            row_to_employee(row)
        })
        .await
    }

    async fn find_by_key(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        bounded(self.operation_timeout, "find_by_key", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            employees::table
                .find(employee_id.as_ref())
                .select(EmployeeRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .map(row_to_employee)
                .transpose()
        })
        .await
    }

    async fn exists(&self, employee_id: &EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        bounded(self.operation_timeout, "exists", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::select(exists(employees::table.find(employee_id.as_ref())))
                .get_result::<bool>(&mut conn)
                .await
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn update_by_key(
        &self,
        employee_id: &EmployeeId,
        patch: &EmployeePatch,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        bounded(self.operation_timeout, "update_by_key", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let changeset = EmployeeChangeset::from_patch(patch, Utc::now());
            diesel::update(employees::table.find(employee_id.as_ref()))
                .set(&changeset)
                .returning(EmployeeRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .map(row_to_employee)
                .transpose()
        })
        .await
    }

    async fn delete_by_key(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<bool, EmployeeRepositoryError> {
        bounded(self.operation_timeout, "delete_by_key", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let deleted = diesel::delete(employees::table.find(employee_id.as_ref()))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn query(
        &self,
        department: Option<Department>,
        skip: u64,
        take: u64,
    ) -> Result<EmployeeSlice, EmployeeRepositoryError> {
        bounded(self.operation_timeout, "query", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let mut count_query = employees::table.select(count_star()).into_boxed();
            let mut page_query = employees::table
                .select(EmployeeRow::as_select())
                .order(employees::created_seq.asc())
                .into_boxed();
            if let Some(department) = department {
                count_query = count_query.filter(employees::department.eq(department.as_str()));
                page_query = page_query.filter(employees::department.eq(department.as_str()));
            }

            let total_count = count_query
                .get_result::<i64>(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            let rows = page_query
                .offset(to_sql_count(skip))
                .limit(to_sql_count(take))
                .load::<EmployeeRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            let employees = rows
                .into_iter()
                .map(row_to_employee)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(EmployeeSlice {
                employees,
                total_count: from_sql_count(total_count),
            })
        })
        .await
    }

    async fn ping(&self) -> Result<(), EmployeeRepositoryError> {
        bounded(self.operation_timeout, "ping", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::sql_query("SELECT 1")
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(map_diesel_error)
        })
        .await
    }
}
