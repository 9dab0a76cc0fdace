//! Backend library modules.
//!
//! The crate follows a ports-and-adapters layout: [`domain`] holds the fest
//! entities, link rules and repository ports; [`inbound`] exposes them over
//! HTTP; [`outbound`] persists them in PostgreSQL through Diesel.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
