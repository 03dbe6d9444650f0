//! Task list backend library modules.
//!
//! Layout follows a hexagonal split: [`domain`] holds the task rules and the
//! ports, [`inbound`] adapts HTTP and WebSocket traffic onto the driving
//! ports, and [`outbound`] implements the driven ports over PostgreSQL, memory
//! and a broadcast channel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
