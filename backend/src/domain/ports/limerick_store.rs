//! Port abstraction for the per-user limerick blob store.

use async_trait::async_trait;

/// Errors raised by limerick store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimerickStoreError {
    /// No blob exists under the requested key.
    #[error("no stored limerick at {key}")]
    NotFound { key: String },

    /// The underlying storage failed.
    #[error("limerick store I/O failed: {message}")]
    Io { message: String },
}

impl LimerickStoreError {
    /// Create a not-found error for the given key.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an I/O error with the given message.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Blob store mapping a string key to file bytes.
///
/// Keys are derived by the caller (see [`crate::domain::limerick::storage_key`]);
/// the store itself knows nothing about usernames.
#[async_trait]
pub trait LimerickStore: Send + Sync {
    /// Write bytes under `key`, creating or overwriting the blob.
    async fn save(&self, key: &str, bytes: Vec<u8>) -> Result<(), LimerickStoreError>;

    /// Read the blob stored under `key`.
    async fn read(&self, key: &str) -> Result<Vec<u8>, LimerickStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_key() {
        let err = LimerickStoreError::not_found("alice_Limerick.txt");
        assert_eq!(err.to_string(), "no stored limerick at alice_Limerick.txt");
    }
}
