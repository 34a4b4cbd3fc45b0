//! Homework solver backend library.
//!
//! The crate is laid out as a hexagon: [`domain`] owns entities, ports and the
//! solve use-case; [`inbound`] adapts HTTP requests onto driving ports;
//! [`outbound`] implements driven ports against the LLM provider, the
//! identity provider and PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{Cors, Trace};
