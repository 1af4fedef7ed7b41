//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`EmployeeRepository`]) are implemented by outbound
//! adapters; driving ports ([`EmployeeCommand`], [`EmployeeQuery`],
//! [`StoreHealth`]) are consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_command;
mod employee_query;
mod employee_repository;
mod store_health;

#[cfg(test)]
pub use employee_command::MockEmployeeCommand;
pub use employee_command::EmployeeCommand;
#[cfg(test)]
pub use employee_query::MockEmployeeQuery;
pub use employee_query::{EmployeeQuery, ListEmployeesRequest};
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{EmployeeRepository, EmployeeRepositoryError, EmployeeSlice};
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::StoreHealth;
