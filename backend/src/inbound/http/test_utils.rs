//! Test helpers for inbound HTTP components.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;
use async_trait::async_trait;

use crate::domain::ports::{
    LimerickStore, LimerickStoreError, UserPersistenceError, UserRepository,
};
use crate::domain::{LimerickMetadata, ProfileDetails, User, Username};

use super::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie from a response, owned so it outlives it.
pub fn session_cookie(
    res: &actix_web::dev::ServiceResponse,
) -> actix_web::cookie::Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// In-memory [`UserRepository`] for handler tests.
#[derive(Default)]
pub struct StubUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl StubUserRepository {
    /// Pre-populate the repository with a user.
    pub fn with_user(user: User) -> Self {
        let repo = Self::default();
        repo.users
            .lock()
            .expect("users lock")
            .insert(user.username().as_str().to_owned(), user);
        repo
    }

    /// Snapshot the stored user, if any.
    pub fn stored(&self, username: &str) -> Option<User> {
        self.users.lock().expect("users lock").get(username).cloned()
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.users.lock().expect("users lock").len()
    }

    /// Drop a stored user, simulating state that vanished underneath a
    /// still-live session.
    pub fn remove(&self, username: &str) {
        self.users.lock().expect("users lock").remove(username);
    }
}

#[async_trait]
impl UserRepository for StubUserRepository {
    async fn create(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<(), UserPersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        if users.contains_key(username.as_str()) {
            return Err(UserPersistenceError::DuplicateUsername);
        }
        users.insert(
            username.as_str().to_owned(),
            User::registered(username.clone(), password),
        );
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("users lock")
            .get(username.as_str())
            .cloned())
    }

    async fn update_details(
        &self,
        username: &Username,
        details: &ProfileDetails,
    ) -> Result<(), UserPersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        if let Some(user) = users.get(username.as_str()) {
            let updated = User::new(
                user.username().clone(),
                user.password(),
                details.clone(),
                user.limerick().cloned(),
            );
            users.insert(username.as_str().to_owned(), updated);
        }
        Ok(())
    }

    async fn update_limerick(
        &self,
        username: &Username,
        limerick: &LimerickMetadata,
    ) -> Result<(), UserPersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        if let Some(user) = users.get(username.as_str()) {
            let updated = User::new(
                user.username().clone(),
                user.password(),
                user.details().clone(),
                Some(limerick.clone()),
            );
            users.insert(username.as_str().to_owned(), updated);
        }
        Ok(())
    }
}

/// In-memory [`LimerickStore`] for handler tests.
#[derive(Default)]
pub struct StubLimerickStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl StubLimerickStore {
    /// Snapshot a stored blob, if any.
    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().expect("blobs lock").get(key).cloned()
    }
}

#[async_trait]
impl LimerickStore for StubLimerickStore {
    async fn save(&self, key: &str, bytes: Vec<u8>) -> Result<(), LimerickStoreError> {
        self.blobs
            .lock()
            .expect("blobs lock")
            .insert(key.to_owned(), bytes);
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, LimerickStoreError> {
        self.blobs
            .lock()
            .expect("blobs lock")
            .get(key)
            .cloned()
            .ok_or_else(|| LimerickStoreError::not_found(key))
    }
}

/// Stub-backed handler state plus handles to inspect the stubs afterwards.
pub fn stub_state() -> (
    Arc<StubUserRepository>,
    Arc<StubLimerickStore>,
    web::Data<HttpState>,
) {
    let users = Arc::new(StubUserRepository::default());
    let limericks = Arc::new(StubLimerickStore::default());
    let state = web::Data::new(HttpState::new(users.clone(), limericks.clone()));
    (users, limericks, state)
}
