//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! This adapter only translates between Diesel rows and domain types; no
//! business logic lives here. Diesel's SQLite connections are synchronous,
//! so every operation clones the pool and runs on the blocking thread pool.

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::{debug, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{LimerickMetadata, ProfileDetails, User, Username};

use super::models::{DetailsChangeset, LimerickChangeset, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to port errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to port errors.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::DuplicateUsername
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain [`User`].
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored username: {err}")))?;

    let details = ProfileDetails {
        firstname: row.firstname.unwrap_or_default(),
        lastname: row.lastname.unwrap_or_default(),
        email: row.email.unwrap_or_default(),
        address: row.address.unwrap_or_default(),
    };

    let limerick = match (row.limerick_filename, row.limerick_wordcount) {
        (Some(filename), Some(count)) => Some(LimerickMetadata {
            filename,
            // Clamp foreign values; the writer side only ever stores u32.
            word_count: u32::try_from(count).unwrap_or(u32::MAX),
        }),
        (None, None) => None,
        (filename, count) => {
            warn!(
                username = %username,
                filename_present = filename.is_some(),
                wordcount_present = count.is_some(),
                "partial limerick metadata in storage, treating as absent"
            );
            None
        }
    };

    Ok(User::new(username, row.password, details, limerick))
}

/// Run a blocking database closure on the blocking thread pool.
async fn run_blocking<T, F>(op: F) -> Result<T, UserPersistenceError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, UserPersistenceError> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|err| UserPersistenceError::query(format!("blocking task failed: {err}")))?
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<(), UserPersistenceError> {
        let pool = self.pool.clone();
        let username = username.as_str().to_owned();
        let password = password.to_owned();

        run_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            diesel::insert_into(users::table)
                .values(&NewUserRow {
                    username: &username,
                    password: &password,
                })
                .execute(&mut conn)
                .map_err(map_diesel_error)?;
            Ok(())
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let pool = self.pool.clone();
        let username = username.as_str().to_owned();

        run_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            users::table
                .filter(users::username.eq(&username))
                .select(UserRow::as_select())
                .first::<UserRow>(&mut conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(row_to_user)
                .transpose()
        })
        .await
    }

    async fn update_details(
        &self,
        username: &Username,
        details: &ProfileDetails,
    ) -> Result<(), UserPersistenceError> {
        let pool = self.pool.clone();
        let username = username.as_str().to_owned();
        let details = details.clone();

        run_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            diesel::update(users::table.filter(users::username.eq(&username)))
                .set(&DetailsChangeset {
                    firstname: Some(&details.firstname),
                    lastname: Some(&details.lastname),
                    email: Some(&details.email),
                    address: Some(&details.address),
                })
                .execute(&mut conn)
                .map_err(map_diesel_error)?;
            Ok(())
        })
        .await
    }

    async fn update_limerick(
        &self,
        username: &Username,
        limerick: &LimerickMetadata,
    ) -> Result<(), UserPersistenceError> {
        let pool = self.pool.clone();
        let username = username.as_str().to_owned();
        let limerick = limerick.clone();

        run_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            diesel::update(users::table.filter(users::username.eq(&username)))
                .set(&LimerickChangeset {
                    limerick_filename: Some(&limerick.filename),
                    limerick_wordcount: Some(i64::from(limerick.word_count)),
                })
                .execute(&mut conn)
                .map_err(map_diesel_error)?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Round-trip coverage over an in-memory SQLite database.
    use super::*;
    use crate::outbound::persistence::{run_migrations, PoolConfig};

    fn repository() -> DieselUserRepository {
        // A single-connection pool keeps the in-memory database alive for the
        // whole test.
        let pool = DbPool::new(PoolConfig::new(":memory:").with_max_size(1))
            .expect("in-memory pool builds");
        run_migrations(&pool).expect("migrations apply");
        DieselUserRepository::new(pool)
    }

    fn username(raw: &str) -> Username {
        Username::new(raw).expect("valid test username")
    }

    #[tokio::test]
    async fn create_then_find_round_trips_credentials() {
        let repo = repository();
        let alice = username("alice");

        repo.create(&alice, "secret").await.expect("create succeeds");
        let user = repo
            .find_by_username(&alice)
            .await
            .expect("lookup succeeds")
            .expect("user exists");

        assert_eq!(user.username(), &alice);
        assert_eq!(user.password(), "secret");
        assert_eq!(user.details(), &ProfileDetails::default());
        assert!(user.limerick().is_none());
    }

    #[tokio::test]
    async fn find_unknown_username_is_absent() {
        let repo = repository();
        let missing = repo
            .find_by_username(&username("nobody"))
            .await
            .expect("lookup succeeds");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn duplicate_create_fails_and_preserves_first_password() {
        let repo = repository();
        let alice = username("alice");

        repo.create(&alice, "first").await.expect("first create");
        let err = repo
            .create(&alice, "second")
            .await
            .expect_err("duplicate must fail");
        assert_eq!(err, UserPersistenceError::DuplicateUsername);

        let user = repo
            .find_by_username(&alice)
            .await
            .expect("lookup succeeds")
            .expect("user exists");
        assert_eq!(user.password(), "first");
    }

    #[tokio::test]
    async fn update_details_overwrites_profile_fields_only() {
        let repo = repository();
        let alice = username("alice");
        repo.create(&alice, "secret").await.expect("create");

        let details = ProfileDetails {
            firstname: "A".to_owned(),
            lastname: "B".to_owned(),
            email: "a@x.com".to_owned(),
            address: "1 Main St".to_owned(),
        };
        repo.update_details(&alice, &details)
            .await
            .expect("update succeeds");

        let user = repo
            .find_by_username(&alice)
            .await
            .expect("lookup succeeds")
            .expect("user exists");
        assert_eq!(user.details(), &details);
        assert_eq!(user.username(), &alice);
        assert_eq!(user.password(), "secret");
    }

    #[tokio::test]
    async fn update_details_for_unknown_username_is_a_noop() {
        let repo = repository();
        let outcome = repo
            .update_details(&username("ghost"), &ProfileDetails::default())
            .await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn update_limerick_sets_both_columns() {
        let repo = repository();
        let alice = username("alice");
        repo.create(&alice, "secret").await.expect("create");

        let limerick = LimerickMetadata {
            filename: "alice_Limerick.txt".to_owned(),
            word_count: 3,
        };
        repo.update_limerick(&alice, &limerick)
            .await
            .expect("update succeeds");

        let user = repo
            .find_by_username(&alice)
            .await
            .expect("lookup succeeds")
            .expect("user exists");
        assert_eq!(user.limerick(), Some(&limerick));
    }

    #[tokio::test]
    async fn second_upload_overwrites_metadata() {
        let repo = repository();
        let alice = username("alice");
        repo.create(&alice, "secret").await.expect("create");

        let first = LimerickMetadata {
            filename: "alice_Limerick.txt".to_owned(),
            word_count: 3,
        };
        let second = LimerickMetadata {
            filename: "alice_Limerick.txt".to_owned(),
            word_count: 41,
        };
        repo.update_limerick(&alice, &first).await.expect("first");
        repo.update_limerick(&alice, &second).await.expect("second");

        let user = repo
            .find_by_username(&alice)
            .await
            .expect("lookup succeeds")
            .expect("user exists");
        assert_eq!(user.limerick(), Some(&second));
    }
}
