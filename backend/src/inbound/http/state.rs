//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EmployeeCommand, EmployeeQuery, StoreHealth};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeeCommand>,
    pub employees_query: Arc<dyn EmployeeQuery>,
    pub store_health: Arc<dyn StoreHealth>,
}

impl HttpState {
    /// Construct state from individual port implementations.
    pub fn new(
        employees: Arc<dyn EmployeeCommand>,
        employees_query: Arc<dyn EmployeeQuery>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            employees,
            employees_query,
            store_health,
        }
    }

    /// Construct state where a single service backs every port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use employee_api::domain::EmployeeService;
    /// use employee_api::inbound::http::state::HttpState;
    /// use employee_api::outbound::memory::InMemoryEmployeeRepository;
    ///
    /// let service = EmployeeService::new(Arc::new(InMemoryEmployeeRepository::new()));
    /// let state = HttpState::from_service(Arc::new(service));
    /// assert_eq!(state.employees_query.list_departments().len(), 10);
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: EmployeeCommand + EmployeeQuery + StoreHealth + 'static,
    {
        Self {
            employees: service.clone(),
            employees_query: service.clone(),
            store_health: service,
        }
    }
}
