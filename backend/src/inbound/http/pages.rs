//! Account and profile page handlers.
//!
//! ```text
//! GET  /            redirect to the registration form
//! GET  /register    registration form     POST /register  create account
//! GET  /login       login form            POST /login     authenticate
//! GET  /logout      clear the session
//! GET  /details     profile-edit form     POST /details   save profile
//! GET  /profile     profile summary
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{Credentials, ProfileDetails};

use super::error::map_user_persistence_error;
use super::outcome::PageOutcome;
use super::session::SessionContext;
use super::state::HttpState;
use super::{ApiResult, messages, paths, views};

/// Credential form payload shared by registration and login.
///
/// Missing fields deserialise to empty strings, mirroring how browsers may
/// omit unfilled inputs.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Profile-edit form payload.
#[derive(Debug, Deserialize)]
pub struct DetailsForm {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl DetailsForm {
    fn into_details(self) -> ProfileDetails {
        ProfileDetails {
            firstname: self.firstname.trim().to_owned(),
            lastname: self.lastname.trim().to_owned(),
            email: self.email.trim().to_owned(),
            address: self.address.trim().to_owned(),
        }
    }
}

/// Landing page: everything starts at registration.
#[get("/")]
pub async fn home() -> PageOutcome {
    PageOutcome::redirect(paths::REGISTER)
}

/// Registration form.
#[get("/register")]
pub async fn register_form(session: SessionContext) -> ApiResult<PageOutcome> {
    let flash = session.take_flash()?;
    Ok(PageOutcome::page(views::register_page(flash.as_deref())))
}

/// Create an account and establish the session.
#[post("/register")]
pub async fn register(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<PageOutcome> {
    let form = form.into_inner();
    let Ok(credentials) = Credentials::try_from_parts(&form.username, &form.password) else {
        return Ok(PageOutcome::redirect_with_flash(
            paths::REGISTER,
            messages::CREDENTIALS_REQUIRED,
        ));
    };

    match state
        .users
        .create(credentials.username(), credentials.password())
        .await
    {
        Ok(()) => {
            session.persist_username(credentials.username())?;
            Ok(PageOutcome::redirect(paths::DETAILS))
        }
        Err(UserPersistenceError::DuplicateUsername) => Ok(PageOutcome::redirect_with_flash(
            paths::REGISTER,
            messages::USERNAME_TAKEN,
        )),
        Err(err) => Err(map_user_persistence_error(err)),
    }
}

/// Login form.
#[get("/login")]
pub async fn login_form(session: SessionContext) -> ApiResult<PageOutcome> {
    let flash = session.take_flash()?;
    Ok(PageOutcome::page(views::login_page(flash.as_deref())))
}

/// Authenticate against the stored credential and establish the session.
///
/// Unknown users and wrong passwords produce the same message so the form
/// does not reveal which usernames exist.
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<PageOutcome> {
    let form = form.into_inner();
    let Ok(credentials) = Credentials::try_from_parts(&form.username, &form.password) else {
        return Ok(PageOutcome::redirect_with_flash(
            paths::LOGIN,
            messages::INVALID_LOGIN,
        ));
    };

    let user = state
        .users
        .find_by_username(credentials.username())
        .await
        .map_err(map_user_persistence_error)?;

    match user {
        Some(user) if user.password() == credentials.password() => {
            session.persist_username(user.username())?;
            Ok(PageOutcome::redirect(paths::PROFILE))
        }
        _ => Ok(PageOutcome::redirect_with_flash(
            paths::LOGIN,
            messages::INVALID_LOGIN,
        )),
    }
}

/// Destroy the session and return to the login form.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> PageOutcome {
    session.purge();
    PageOutcome::redirect(paths::LOGIN)
}

/// Profile-edit form; requires an authenticated session.
#[get("/details")]
pub async fn details_form(session: SessionContext) -> ApiResult<PageOutcome> {
    session.require_username()?;
    let flash = session.take_flash()?;
    Ok(PageOutcome::page(views::details_page(flash.as_deref())))
}

/// Persist the submitted profile fields.
#[post("/details")]
pub async fn submit_details(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<DetailsForm>,
) -> ApiResult<PageOutcome> {
    let username = session.require_username()?;
    state
        .users
        .update_details(&username, &form.into_inner().into_details())
        .await
        .map_err(map_user_persistence_error)?;
    Ok(PageOutcome::redirect(paths::PROFILE))
}

/// Profile summary; requires an authenticated session.
#[get("/profile")]
pub async fn profile(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<PageOutcome> {
    let username = session.require_username()?;
    let Some(user) = state
        .users
        .find_by_username(&username)
        .await
        .map_err(map_user_persistence_error)?
    else {
        // The session names a user the store no longer knows; start over.
        session.purge();
        return Ok(PageOutcome::redirect(paths::LOGIN));
    };

    let flash = session.take_flash()?;
    Ok(PageOutcome::page(views::profile_page(
        &user,
        flash.as_deref(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Username;
    use crate::inbound::http::test_utils::{session_cookie, stub_state, test_session_middleware};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use rstest::rstest;

    fn page_test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(test_session_middleware())
            .service(home)
            .service(register_form)
            .service(register)
            .service(login_form)
            .service(login)
            .service(logout)
            .service(details_form)
            .service(submit_details)
            .service(profile)
    }

    fn location(res: &actix_web::dev::ServiceResponse) -> Option<&str> {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    #[actix_web::test]
    async fn home_redirects_to_registration() {
        let (_, _, state) = stub_state();
        let app = test::init_service(page_test_app(state)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(paths::REGISTER));
    }

    #[actix_web::test]
    async fn register_creates_user_and_redirects_to_details() {
        let (users, _, state) = stub_state();
        let app = test::init_service(page_test_app(state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([("username", "alice"), ("password", "secret")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(paths::DETAILS));
        let stored = users.stored("alice").expect("user created");
        assert_eq!(stored.password(), "secret");

        // The session is established: the profile renders.
        let cookie = session_cookie(&res);
        let profile_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(profile_res.status(), StatusCode::OK);
        let body = test::read_body(profile_res).await;
        assert!(std::str::from_utf8(&body).expect("utf8").contains("alice"));
    }

    #[rstest]
    #[case("", "secret")]
    #[case("   ", "secret")]
    #[case("alice", "")]
    #[case("alice", "   ")]
    #[actix_web::test]
    async fn register_rejects_blank_credentials(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let (users, _, state) = stub_state();
        let app = test::init_service(page_test_app(state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([("username", username), ("password", password)])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(paths::REGISTER));
        assert_eq!(users.user_count(), 0);

        // The flash shows on the re-rendered form.
        let cookie = session_cookie(&res);
        let form_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/register")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body = test::read_body(form_res).await;
        assert!(
            std::str::from_utf8(&body)
                .expect("utf8")
                .contains(messages::CREDENTIALS_REQUIRED)
        );
    }

    #[actix_web::test]
    async fn duplicate_registration_flashes_and_keeps_first_password() {
        let (users, _, state) = stub_state();
        let app = test::init_service(page_test_app(state)).await;

        let first = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([("username", "alice"), ("password", "first")])
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::SEE_OTHER);

        let second = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([("username", "alice"), ("password", "second")])
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&second), Some(paths::REGISTER));

        let stored = users.stored("alice").expect("first registration stands");
        assert_eq!(stored.password(), "first");

        let cookie = session_cookie(&second);
        let form_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/register")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body = test::read_body(form_res).await;
        assert!(
            std::str::from_utf8(&body)
                .expect("utf8")
                .contains(messages::USERNAME_TAKEN)
        );
    }

    #[actix_web::test]
    async fn login_with_correct_credentials_reaches_the_profile() {
        let (_, _, state) = stub_state();
        let app = test::init_service(page_test_app(state.clone())).await;
        state
            .users
            .create(
                &Username::new("alice").expect("valid username"),
                "secret",
            )
            .await
            .expect("seed user");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form([("username", "alice"), ("password", "secret")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(paths::PROFILE));

        let cookie = session_cookie(&res);
        let profile_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(profile_res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case("alice", "wrong")]
    #[case("nobody", "secret")]
    #[case("", "")]
    #[actix_web::test]
    async fn login_failures_flash_the_same_message(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let (_, _, state) = stub_state();
        let app = test::init_service(page_test_app(state.clone())).await;
        state
            .users
            .create(
                &Username::new("alice").expect("valid username"),
                "secret",
            )
            .await
            .expect("seed user");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form([("username", username), ("password", password)])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(paths::LOGIN));

        let cookie = session_cookie(&res);
        let form_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/login")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body = test::read_body(form_res).await;
        assert!(
            std::str::from_utf8(&body)
                .expect("utf8")
                .contains(messages::INVALID_LOGIN)
        );
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let (_, _, state) = stub_state();
        let app = test::init_service(page_test_app(state)).await;

        let registered = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([("username", "alice"), ("password", "secret")])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&registered);

        let logout_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&logout_res), Some(paths::LOGIN));

        let purged = session_cookie(&logout_res);
        let profile_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile")
                .cookie(purged)
                .to_request(),
        )
        .await;
        assert_eq!(profile_res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&profile_res), Some(paths::LOGIN));
    }

    #[actix_web::test]
    async fn submitted_details_are_trimmed_and_stored() {
        let (users, _, state) = stub_state();
        let app = test::init_service(page_test_app(state)).await;

        let registered = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([("username", "alice"), ("password", "secret")])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&registered);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/details")
                .cookie(cookie)
                .set_form([
                    ("firstname", "  A  "),
                    ("lastname", "B"),
                    ("email", "a@x.com"),
                    ("address", "1 Main St"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(paths::PROFILE));

        let stored = users.stored("alice").expect("user exists");
        assert_eq!(
            stored.details(),
            &ProfileDetails {
                firstname: "A".to_owned(),
                lastname: "B".to_owned(),
                email: "a@x.com".to_owned(),
                address: "1 Main St".to_owned(),
            }
        );
        assert_eq!(stored.password(), "secret");
    }

    #[rstest]
    #[case("/profile")]
    #[case("/details")]
    #[actix_web::test]
    async fn protected_pages_redirect_anonymous_clients(#[case] path: &str) {
        let (users, _, state) = stub_state();
        let app = test::init_service(page_test_app(state)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(paths::LOGIN));
        assert_eq!(users.user_count(), 0);
    }

    #[actix_web::test]
    async fn profile_for_a_vanished_user_starts_over() {
        let (users, _, state) = stub_state();
        let app = test::init_service(page_test_app(state)).await;

        let registered = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([("username", "alice"), ("password", "secret")])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&registered);

        // The backing user disappears underneath the still-live session.
        users.remove("alice");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(paths::LOGIN));
    }
}
