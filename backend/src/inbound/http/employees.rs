//! Employee record HTTP handlers.
//!
//! ```text
//! POST   /employees
//! GET    /employees?page=1&limit=10&department=Engineering
//! GET    /employees/meta/departments
//! GET    /employees/{employee_id}
//! PATCH  /employees/{employee_id}
//! DELETE /employees/{employee_id}
//! ```
//!
//! Bodies are forwarded to the service as raw JSON so that validation can
//! report every offending field at once; only undecodable input is rejected
//! by the extractor.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ListEmployeesRequest;
use crate::domain::Employee;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DepartmentSchema, EmployeeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

const CREATED_MESSAGE: &str = "Employee created successfully";
const UPDATED_MESSAGE: &str = "Employee updated successfully";
const DELETED_MESSAGE: &str = "Employee deleted successfully";

/// Wire representation of a stored employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(minimum = 18, maximum = 100, example = 30)]
    pub age: u8,
    #[schema(value_type = DepartmentSchema, example = "Engineering")]
    pub department: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(value: Employee) -> Self {
        Self {
            employee_id: value.employee_id().to_string(),
            name: value.name().to_string(),
            age: value.age().get(),
            department: value.department().as_str().to_owned(),
        }
    }
}

/// Envelope wrapping a single employee.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeData {
    pub employee: EmployeeResponse,
}

/// Confirmation returned by create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeMessageResponse {
    #[schema(example = "Employee created successfully")]
    pub message: String,
    pub data: EmployeeData,
}

impl EmployeeMessageResponse {
    fn new(message: &str, employee: Employee) -> Self {
        Self {
            message: message.to_owned(),
            data: EmployeeData {
                employee: employee.into(),
            },
        }
    }
}

/// Identifier of a removed employee.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedEmployeeData {
    #[schema(example = "EMP001")]
    pub deleted_employee_id: String,
}

/// Confirmation returned by delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteEmployeeResponse {
    #[schema(example = "Employee deleted successfully")]
    pub message: String,
    pub data: DeletedEmployeeData,
}

/// One page of employees.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeListResponse {
    pub total_count: u64,
    pub page: u64,
    pub limit: u64,
    pub employees: Vec<EmployeeResponse>,
}

impl From<Page<Employee>> for EmployeeListResponse {
    fn from(value: Page<Employee>) -> Self {
        let page = value.map(EmployeeResponse::from);
        Self {
            total_count: page.total_count,
            page: page.page,
            limit: page.limit,
            employees: page.items,
        }
    }
}

/// The closed set of departments.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentsResponse {
    #[schema(value_type = Vec<DepartmentSchema>)]
    pub departments: Vec<String>,
}

/// Query string accepted by the list endpoint.
///
/// Missing values fall back to page 1 and 10 records per page. Out-of-range
/// values are reported by the service rather than clamped here.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEmployeesQuery {
    /// Page number, starting at 1.
    #[param(minimum = 1, example = 1)]
    pub page: Option<i64>,
    /// Records per page, between 1 and 100.
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub limit: Option<i64>,
    /// Exact department name to filter by.
    #[param(value_type = Option<DepartmentSchema>)]
    pub department: Option<String>,
}

impl From<ListEmployeesQuery> for ListEmployeesRequest {
    fn from(value: ListEmployeesQuery) -> Self {
        let defaults = Self::default();
        Self {
            page: value.page.unwrap_or(defaults.page),
            limit: value.limit.unwrap_or(defaults.limit),
            department: value.department,
        }
    }
}

/// Create an employee record.
#[utoipa::path(
    post,
    path = "/employees",
    request_body(content = EmployeeSchema, description = "Complete employee record"),
    responses(
        (status = 201, description = "Employee created", body = EmployeeMessageResponse),
        (status = 409, description = "Employee ID already exists", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let employee = state.employees.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(EmployeeMessageResponse::new(CREATED_MESSAGE, employee)))
}

/// List employees one page at a time.
#[utoipa::path(
    get,
    path = "/employees",
    params(ListEmployeesQuery),
    responses(
        (status = 200, description = "Page of employees", body = EmployeeListResponse),
        (status = 422, description = "Invalid paging or filter", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    query: web::Query<ListEmployeesQuery>,
) -> ApiResult<web::Json<EmployeeListResponse>> {
    let page = state
        .employees_query
        .list(query.into_inner().into())
        .await?;
    Ok(web::Json(page.into()))
}

/// List the accepted department names.
#[utoipa::path(
    get,
    path = "/employees/meta/departments",
    responses(
        (status = 200, description = "Department names", body = DepartmentsResponse)
    ),
    tags = ["employees"],
    operation_id = "listDepartments"
)]
#[get("/employees/meta/departments")]
pub async fn list_departments(state: web::Data<HttpState>) -> web::Json<DepartmentsResponse> {
    let departments = state
        .employees_query
        .list_departments()
        .into_iter()
        .map(|department| department.as_str().to_owned())
        .collect();
    web::Json(DepartmentsResponse { departments })
}

/// Fetch one employee.
#[utoipa::path(
    get,
    path = "/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee record", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{employee_id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let employee = state.employees_query.get(&path).await?;
    Ok(web::Json(employee.into()))
}

/// Change some fields of an employee.
#[utoipa::path(
    patch,
    path = "/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee identifier")),
    request_body(
        content = serde_json::Value,
        description = "Any of name, age and department"
    ),
    responses(
        (status = 200, description = "Employee updated", body = EmployeeMessageResponse),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[patch("/employees/{employee_id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<EmployeeMessageResponse>> {
    let employee = state
        .employees
        .update(&path, payload.into_inner())
        .await?;
    Ok(web::Json(EmployeeMessageResponse::new(
        UPDATED_MESSAGE,
        employee,
    )))
}

/// Remove an employee.
#[utoipa::path(
    delete,
    path = "/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee deleted", body = DeleteEmployeeResponse),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{employee_id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteEmployeeResponse>> {
    let removed = state.employees.delete(&path).await?;
    Ok(web::Json(DeleteEmployeeResponse {
        message: DELETED_MESSAGE.to_owned(),
        data: DeletedEmployeeData {
            deleted_employee_id: removed.to_string(),
        },
    }))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
