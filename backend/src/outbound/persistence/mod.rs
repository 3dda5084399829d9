//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the domain's
//! [`crate::domain::ports::UserRepository`] port backed by a local SQLite
//! file.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed to
//!   the domain layer.
//! - **Blocking I/O off the executor**: SQLite connections are synchronous;
//!   adapters run them on the blocking thread pool.
//! - **Strongly typed errors**: database failures are mapped to the port's
//!   persistence error type.

mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations compiled into the binary so deployments need no external files.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying embedded migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// No connection could be checked out to run migrations on.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// A migration failed to apply.
    #[error("failed to run embedded migrations: {message}")]
    Migration { message: String },
}

/// Idempotently apply the embedded migrations, creating the users table on
/// first start.
pub fn run_migrations(pool: &DbPool) -> Result<(), MigrationError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Migration {
            message: err.to_string(),
        })?;
    Ok(())
}
