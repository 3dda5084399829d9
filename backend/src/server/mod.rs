//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
use crate::inbound::http::HttpState;
use crate::inbound::http::pages::{
    details_form, home, login, login_form, logout, profile, register, register_form,
    submit_details,
};
use crate::inbound::http::uploads::{download, upload};
use crate::outbound::files::DirLimerickStore;
use crate::outbound::persistence::{DbPool, DieselUserRepository};

fn build_http_state(db_pool: DbPool, limerick_store: DirLimerickStore) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(DieselUserRepository::new(db_pool)),
        Arc::new(limerick_store),
    ))
}

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    // The session cookie lives for the browser session; there is no
    // server-side expiry policy.
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .build();

    App::new()
        .app_data(http_state)
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

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool,
        limerick_store,
    } = config;

    let http_state = build_http_state(db_pool, limerick_store);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
