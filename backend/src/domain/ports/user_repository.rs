//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{LimerickMetadata, ProfileDetails, User, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },

    /// Creation hit the uniqueness constraint on the username.
    #[error("username is already taken")]
    DuplicateUsername,
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Durable storage for [`User`] records, keyed by username.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record holding only the credentials; every other field
    /// starts absent. Fails with [`UserPersistenceError::DuplicateUsername`]
    /// when the username already exists.
    async fn create(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<(), UserPersistenceError>;

    /// Point lookup by unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite the four profile fields. Silently a no-op for unknown
    /// usernames; callers hold an authenticated session for an existing user.
    async fn update_details(
        &self,
        username: &Username,
        details: &ProfileDetails,
    ) -> Result<(), UserPersistenceError>;

    /// Overwrite the upload metadata pair. Same existence caveat as
    /// [`UserRepository::update_details`].
    async fn update_limerick(
        &self,
        username: &Username,
        limerick: &LimerickMetadata,
    ) -> Result<(), UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_accept_str_for_message_fields() {
        let err = UserPersistenceError::connection("database unavailable");
        assert_eq!(
            err.to_string(),
            "user repository connection failed: database unavailable"
        );

        let err = UserPersistenceError::query("bad statement");
        assert_eq!(err.to_string(), "user repository query failed: bad statement");
    }

    #[test]
    fn duplicate_username_has_a_stable_message() {
        assert_eq!(
            UserPersistenceError::DuplicateUsername.to_string(),
            "username is already taken"
        );
    }
}
