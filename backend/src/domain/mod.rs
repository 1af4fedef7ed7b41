//! Domain primitives, services and ports.
//!
//! Purpose: hold the employee record model, its validation rules and the
//! lifecycle service, independent of HTTP and storage concerns.
//!
//! Public surface:
//! - Employee and its value objects (`EmployeeId`, `EmployeeName`, `Age`,
//!   `Department`) plus `EmployeePatch` for partial updates.
//! - `validation` for create/update payload checks.
//! - `EmployeeService` implementing the driving ports in [`ports`].
//! - Error (alias to `error::Error`) and ErrorCode for transport adapters.

pub mod employee;
pub mod employee_error;
pub mod employee_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod validation;

pub use self::employee::{
    Age, Department, Employee, EmployeeId, EmployeeName, EmployeePatch, UnknownDepartment,
};
pub use self::employee_error::EmployeeError;
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{FieldViolation, ValidationErrors, ViolationKind};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use employee_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
