//! Backend library modules.
//!
//! A small session-based web application: user registration, login, profile
//! editing, and a single per-user limerick upload with a recomputed word
//! count. Laid out hexagonally: [`domain`] holds the entities and ports,
//! [`inbound`] the HTTP adapter, [`outbound`] the SQLite and filesystem
//! adapters, and [`server`] the wiring.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Request tracing middleware attaching a `trace-id` header.
pub use middleware::trace::Trace;
