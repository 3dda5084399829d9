//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without real I/O.

use std::sync::Arc;

use crate::domain::ports::{LimerickStore, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Durable user storage.
    pub users: Arc<dyn UserRepository>,
    /// Blob storage for uploaded limericks.
    pub limericks: Arc<dyn LimerickStore>,
}

impl HttpState {
    /// Bundle the port implementations handlers depend on.
    pub fn new(users: Arc<dyn UserRepository>, limericks: Arc<dyn LimerickStore>) -> Self {
        Self { users, limericks }
    }
}
