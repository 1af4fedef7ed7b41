//! Builders for the HTTP state backed by the configured record store.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use employee_api::domain::EmployeeService;
use employee_api::inbound::http::state::HttpState;
use employee_api::outbound::memory::InMemoryEmployeeRepository;
use employee_api::outbound::persistence::DieselEmployeeRepository;

use super::ServerConfig;

/// Build the HTTP state over PostgreSQL when a pool is configured, otherwise
/// over an in-process store whose records vanish on restart.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!(
                timeout_ms = config.operation_timeout.as_millis(),
                "using PostgreSQL employee store"
            );
            let repository = DieselEmployeeRepository::new(pool.clone())
                .with_operation_timeout(config.operation_timeout);
            HttpState::from_service(Arc::new(EmployeeService::new(Arc::new(repository))))
        }
        None => {
            warn!("no database configured; employee records are kept in memory only");
            HttpState::from_service(Arc::new(EmployeeService::new(Arc::new(
                InMemoryEmployeeRepository::new(),
            ))))
        }
    };
    web::Data::new(state)
}
