//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod employees;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

pub use crate::domain::ApiResult;

/// Register the employee endpoints together with the extractor
/// configuration that reports undecodable input as validation failures.
///
/// The department listing is registered ahead of the identifier routes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use employee_api::inbound::http::configure_employees;
///
/// let app = App::new().configure(configure_employees);
/// ```
pub fn configure_employees(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(employees::list_departments)
        .service(employees::create_employee)
        .service(employees::list_employees)
        .service(employees::get_employee)
        .service(employees::update_employee)
        .service(employees::delete_employee);
}

/// Register the root summary and health endpoints.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health::service_info)
        .service(health::health_report)
        .service(health::ready)
        .service(health::live);
}
