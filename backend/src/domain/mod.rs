//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed domain entities used by the HTTP adapter
//! and the persistence layers. Keep types immutable and document invariants
//! in each type's Rustdoc.
//!
//! Public surface:
//! - [`User`], [`Username`], [`ProfileDetails`], [`LimerickMetadata`] — the
//!   single persisted entity and its parts.
//! - [`Credentials`] — validated login/registration payload.
//! - [`limerick`] — upload filename rules, storage keys, and the word count.
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failure payload.
//! - [`ports`] — traits the outbound adapters implement.

pub mod auth;
pub mod error;
pub mod limerick;
pub mod ports;
pub mod user;

pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{
    LimerickMetadata, ProfileDetails, User, Username, UsernameValidationError,
};
