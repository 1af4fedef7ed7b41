//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request could not be decoded at all.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// One or more fields failed validation.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with an existing record.
    #[schema(rename = "conflict")]
    Conflict,
    /// The record store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "1 validation error: age: input should be greater than or equal to 18")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details; validation failures carry `violations`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::FieldViolation`].
///
/// One rejected field inside `details.violations`.
#[derive(ToSchema)]
#[schema(as = crate::domain::FieldViolation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldViolationSchema {
    /// Offending field, `body` for the whole document or `query` for the
    /// query string.
    #[schema(example = "age")]
    field: String,
    /// Machine-readable rule name.
    #[schema(example = "greater_than_equal")]
    kind: String,
    /// Human-readable description of the rule.
    #[schema(example = "input should be greater than or equal to 18")]
    message: String,
    /// The rejected input, when present.
    value: Option<serde_json::Value>,
    /// Bound or allowed set the rule enforces.
    #[schema(example = json!({ "ge": 18 }))]
    constraint: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Department`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Department)]
pub enum DepartmentSchema {
    #[schema(rename = "Engineering")]
    Engineering,
    #[schema(rename = "Marketing")]
    Marketing,
    #[schema(rename = "Finance")]
    Finance,
    #[schema(rename = "Human Resources")]
    HumanResources,
    #[schema(rename = "Sales")]
    Sales,
    #[schema(rename = "Operations")]
    Operations,
    #[schema(rename = "Information Technology")]
    InformationTechnology,
    #[schema(rename = "Legal")]
    Legal,
    #[schema(rename = "Customer Service")]
    CustomerService,
    #[schema(rename = "Research and Development")]
    ResearchAndDevelopment,
}

/// OpenAPI schema for [`crate::domain::Employee`].
///
/// Complete employee record as accepted on create.
#[derive(ToSchema)]
#[schema(as = crate::domain::Employee)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmployeeSchema {
    /// Business key: 1 to 50 letters, digits, `_` or `-`.
    #[schema(example = "EMP001", max_length = 50, pattern = "^[A-Za-z0-9_-]+$")]
    employee_id: String,
    /// Full name; surrounding whitespace is trimmed.
    #[schema(example = "John Doe", min_length = 2, max_length = 100)]
    name: String,
    /// Age in whole years.
    #[schema(example = 30, minimum = 18, maximum = 100)]
    age: u8,
    /// Department the employee belongs to.
    department: DepartmentSchema,
}
