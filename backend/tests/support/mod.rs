//! Shared fixtures for the integration suites: a fully wired application
//! over a scratch SQLite database and upload directory.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};

use backend::Trace;
use backend::inbound::http::HttpState;
use backend::inbound::http::pages::{
    details_form, home, login, login_form, logout, profile, register, register_form,
    submit_details,
};
use backend::inbound::http::uploads::{download, upload};
use backend::outbound::files::DirLimerickStore;
use backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};

/// Handler state over real adapters, plus the scratch directory keeping the
/// database and uploads alive for the duration of the test.
pub struct TestBackend {
    pub state: web::Data<HttpState>,
    _scratch: tempfile::TempDir,
}

/// Wire the real SQLite repository and directory store over a scratch dir.
pub fn test_backend() -> TestBackend {
    let scratch = tempfile::tempdir().expect("create scratch dir");

    let db_path = scratch.path().join("users.db");
    let pool =
        DbPool::new(PoolConfig::new(db_path.to_string_lossy().as_ref())).expect("pool builds");
    run_migrations(&pool).expect("migrations apply");

    let store = DirLimerickStore::open(scratch.path().join("uploads")).expect("store opens");

    let state = web::Data::new(HttpState::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(store),
    ));

    TestBackend {
        state,
        _scratch: scratch,
    }
}

/// The full route table as the server wires it, with a test session key and
/// the `Secure` cookie flag disabled for plain-HTTP tests.
pub fn full_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(state)
        .wrap(session)
        .wrap(Trace)
        .service(home)
        .service(register_form)
        .service(register)
        .service(login_form)
        .service(login)
        .service(logout)
        .service(details_form)
        .service(submit_details)
        .service(profile)
        .service(upload)
        .service(download)
}

/// Extract the session cookie from a response, owned so it outlives it.
pub fn session_cookie(res: &ServiceResponse) -> actix_web::cookie::Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// The `Location` header of a redirect response.
pub fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Register a user through the HTTP surface and return the session cookie.
pub async fn register_user<S>(
    app: &S,
    username: &str,
    password: &str,
) -> actix_web::cookie::Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_form([("username", username), ("password", password)])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::SEE_OTHER);
    session_cookie(&res)
}

/// Read a response body as UTF-8 text.
pub async fn body_text(res: ServiceResponse) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
