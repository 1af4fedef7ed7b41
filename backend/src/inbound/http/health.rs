//! Health endpoints: liveness & readiness probes for orchestration and load balancers,
//! plus the human-facing service summary and store report.
//! Document endpoints in OpenAPI via Utoipa.
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;

/// Display name reported by the service summary.
pub const SERVICE_NAME: &str = "Employee Management API";
/// Version reported by the service summary and store report.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared health state for readiness and liveness checks.
/// Track readiness and whether the process should report itself as alive to orchestrators.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. Return 200 when the server is initialised and the record
/// store answers; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (status = 503, description = "Server is not ready or the record store is unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>, http: web::Data<HttpState>) -> HttpResponse {
    if !state.is_ready() {
        return HealthState::probe_response(false);
    }
    let store_ok = http.store_health.check_store().await.is_ok();
    HealthState::probe_response(store_ok)
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
/// Call `HealthState::mark_unhealthy` before graceful shutdown to surface the drain early.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (
            status = 503,
            description = "Server is shutting down"
        )
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

/// Store connectivity report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    #[schema(example = "running")]
    pub status: String,
    #[schema(example = "2.0.0")]
    pub version: String,
    /// `healthy`, or `unhealthy` when the store does not answer. The cause is
    /// only logged.
    #[schema(example = "healthy")]
    pub database: String,
}

/// Report process and record store status. Always answers 200; the store
/// state is carried in the body.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service and store status", body = HealthReport))
)]
#[get("/health")]
pub async fn health_report(http: web::Data<HttpState>) -> web::Json<HealthReport> {
    let database = match http.store_health.check_store().await {
        Ok(()) => {
            debug!("record store health check passed");
            "healthy".to_owned()
        }
        Err(err) => {
            error!(error = %err, "record store health check failed");
            "unhealthy".to_owned()
        }
    };
    web::Json(HealthReport {
        status: "running".to_owned(),
        version: SERVICE_VERSION.to_owned(),
        database,
    })
}

/// Endpoint map advertised by the service summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EndpointMap {
    pub create_employee: String,
    pub list_employees: String,
    pub get_employee: String,
    pub update_employee: String,
    pub delete_employee: String,
    pub list_departments: String,
}

impl Default for EndpointMap {
    fn default() -> Self {
        Self {
            create_employee: "POST /employees".to_owned(),
            list_employees: "GET /employees?page=1&limit=10".to_owned(),
            get_employee: "GET /employees/{employee_id}".to_owned(),
            update_employee: "PATCH /employees/{employee_id}".to_owned(),
            delete_employee: "DELETE /employees/{employee_id}".to_owned(),
            list_departments: "GET /employees/meta/departments".to_owned(),
        }
    }
}

/// Service summary returned from the root path.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    #[schema(example = "Welcome to Employee Management API")]
    pub message: String,
    pub name: String,
    pub version: String,
    /// Path of the interactive API documentation.
    pub documentation: String,
    pub endpoints: EndpointMap,
}

/// Describe the service and its endpoints.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service summary", body = ServiceInfo))
)]
#[get("/")]
pub async fn service_info() -> web::Json<ServiceInfo> {
    web::Json(ServiceInfo {
        message: format!("Welcome to {SERVICE_NAME}"),
        name: SERVICE_NAME.to_owned(),
        version: SERVICE_VERSION.to_owned(),
        documentation: "/docs".to_owned(),
        endpoints: EndpointMap::default(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::EmployeeError;
    use crate::domain::ports::{MockEmployeeCommand, MockEmployeeQuery, MockStoreHealth};

    fn http_state(store_up: bool) -> web::Data<HttpState> {
        let mut store = MockStoreHealth::new();
        store.expect_check_store().returning(move || {
            if store_up {
                Ok(())
            } else {
                Err(EmployeeError::StoreUnavailable {
                    message: "connection refused".to_owned(),
                })
            }
        });
        web::Data::new(HttpState::new(
            Arc::new(MockEmployeeCommand::new()),
            Arc::new(MockEmployeeQuery::new()),
            Arc::new(store),
        ))
    }

    async fn probe(uri: &str, health: HealthState, store_up: bool) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(health))
                .app_data(http_state(store_up))
                .service(ready)
                .service(live),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
        res.status()
    }

    fn ready_state() -> HealthState {
        let state = HealthState::new();
        state.mark_ready();
        state
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_waits_for_startup() {
        assert_eq!(
            probe("/health/ready", HealthState::new(), true).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[rstest]
    #[case(true, StatusCode::OK)]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn readiness_follows_store(#[case] store_up: bool, #[case] expected: StatusCode) {
        assert_eq!(probe("/health/ready", ready_state(), store_up).await, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_flips_when_draining() {
        assert_eq!(
            probe("/health/live", HealthState::new(), false).await,
            StatusCode::OK
        );
        let draining = HealthState::new();
        draining.mark_unhealthy();
        assert_eq!(
            probe("/health/live", draining, true).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[rstest]
    #[case(true, "healthy")]
    #[case(false, "unhealthy")]
    #[actix_web::test]
    async fn report_describes_store(#[case] store_up: bool, #[case] database: &str) {
        let app = test::init_service(
            App::new()
                .app_data(http_state(store_up))
                .service(health_report),
        )
        .await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["version"], SERVICE_VERSION);
        assert_eq!(body["database"], database);
    }

    #[rstest]
    #[actix_web::test]
    async fn root_lists_endpoints() {
        let app = test::init_service(App::new().service(service_info)).await;
        let body: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(body["name"], SERVICE_NAME);
        assert_eq!(body["version"], "2.0.0");
        assert_eq!(
            body["endpoints"]["list_departments"],
            "GET /employees/meta/departments"
        );
    }
}
