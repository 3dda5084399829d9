//! User data model.

use std::fmt;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    /// The username was missing or blank once trimmed.
    Empty,
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UsernameValidationError {}

/// Unique account identifier chosen at registration and immutable afterwards.
///
/// ## Invariants
/// - Non-empty once trimmed of surrounding whitespace; stored trimmed.
///
/// # Examples
/// ```
/// use backend::domain::Username;
///
/// let username = Username::new("  alice  ").unwrap();
/// assert_eq!(username.as_str(), "alice");
/// assert!(Username::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from raw form input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Username string suitable for lookups and storage key derivation.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Editable profile fields. All free text, defaulting to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub address: String,
}

/// Metadata describing the user's single uploaded limerick.
///
/// The word count is always recomputed from the uploaded bytes; it is never
/// supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimerickMetadata {
    /// Storage key of the blob, `{username}_Limerick.txt`.
    pub filename: String,
    /// Whitespace-delimited token count of the blob contents.
    pub word_count: u32,
}

/// Application user.
///
/// ## Invariants
/// - `username` is unique across the store and immutable after creation.
/// - `limerick` is `Some` exactly when an upload has completed; the filename
///   and word count are never present independently of each other.
///
/// The password is stored and compared as plain text by design of the
/// service; see the repository notes before changing this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    password: String,
    details: ProfileDetails,
    limerick: Option<LimerickMetadata>,
}

impl User {
    /// Assemble a [`User`] from validated components.
    pub fn new(
        username: Username,
        password: impl Into<String>,
        details: ProfileDetails,
        limerick: Option<LimerickMetadata>,
    ) -> Self {
        Self {
            username,
            password: password.into(),
            details,
            limerick,
        }
    }

    /// The freshly registered shape: credentials only, everything else empty.
    pub fn registered(username: Username, password: impl Into<String>) -> Self {
        Self::new(username, password, ProfileDetails::default(), None)
    }

    /// Unique account identifier.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored credential, compared verbatim at login.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Editable profile fields.
    pub fn details(&self) -> &ProfileDetails {
        &self.details
    }

    /// Upload metadata, present once a limerick has been stored.
    pub fn limerick(&self) -> Option<&LimerickMetadata> {
        self.limerick.as_ref()
    }
}
