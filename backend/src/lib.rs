//! Student records service library.
//!
//! - `domain`: the student model, schema validation and services.
//! - `inbound`: HTTP adapter exposing the CRUD endpoints.
//! - `outbound`: in-memory and PostgreSQL storage adapters.
//! - `example_data`: optional demo students seeded at startup.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
