//! Authentication primitives such as submitted credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{Username, UsernameValidationError};

/// Domain error returned when a credential payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username/password pair submitted by the registration and login
/// forms.
///
/// ## Invariants
/// - `username` satisfies [`Username`] validation (trimmed, non-empty).
/// - `password` is non-empty once trimmed; it keeps its trimmed form so the
///   comparison against the stored credential matches what registration
///   persisted.
///
/// The password buffer is zeroised on drop. Storage is a different matter:
/// the repository persists it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password form inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username).map_err(|err| match err {
            UsernameValidationError::Empty => CredentialsValidationError::EmptyUsername,
        })?;

        let password = password.trim();
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated username suitable for lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string as the user submitted it (trimmed).
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
