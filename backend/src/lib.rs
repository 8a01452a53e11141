//! Userbank library modules.
//!
//! A users screen and a banks screen over in-memory collections, filled from
//! a random-data source and edited one draft at a time. Deleting a bank that
//! users still reference is refused.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
