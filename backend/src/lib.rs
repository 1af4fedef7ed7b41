//! Employee record service library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] owns the record model,
//! validation and lifecycle service; [`inbound`] exposes it over HTTP;
//! [`outbound`] provides PostgreSQL and in-process record stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
