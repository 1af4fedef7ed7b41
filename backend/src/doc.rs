//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (employees, health)
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`EmployeeSchema`], [`DepartmentSchema`], [`FieldViolationSchema`]) that
//!   provide OpenAPI definitions without coupling domain types to the utoipa
//!   framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    DepartmentSchema, EmployeeSchema, ErrorCodeSchema, ErrorSchema, FieldViolationSchema,
};
use utoipa::{Modify, OpenApi};

/// Describe the request correlation header in the document summary.
struct TraceHeaderAddon;

impl Modify for TraceHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let description = openapi.info.description.get_or_insert_with(String::new);
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(
            "Every response carries a `trace-id` header; send a UUID in the same \
             header to correlate a request with server logs.",
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&TraceHeaderAddon),
    info(
        title = "Employee Management API",
        description = "Create, read, update, delete and list employee records.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::list_departments,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::service_info,
        crate::inbound::http::health::health_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        FieldViolationSchema,
        EmployeeSchema,
        DepartmentSchema,
    )),
    tags(
        (name = "employees", description = "Employee record lifecycle"),
        (name = "health", description = "Service summary and health checks")
    )
)]
pub struct ApiDoc;
