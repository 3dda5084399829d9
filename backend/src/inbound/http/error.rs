//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while giving every
//! handler one consistent failure behaviour. An unauthenticated request is
//! silently redirected to the login page; anything else renders a minimal
//! error page with the matching status code.

use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::ports::{LimerickStoreError, UserPersistenceError};
use crate::domain::{Error, ErrorCode};

use super::{paths, views};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        // Unauthenticated browsers are redirected, not challenged.
        ErrorCode::Unauthorized => StatusCode::SEE_OTHER,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    // Do not leak internal failure detail to clients.
    if matches!(error.code(), ErrorCode::InternalError) {
        "Internal server error"
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::Unauthorized) {
            return HttpResponse::SeeOther()
                .insert_header((header::LOCATION, paths::LOGIN))
                .finish();
        }

        let status = self.status_code();
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), "request failed");
        }
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(views::error_page(status.as_u16(), client_message(self)))
    }
}

/// Map user persistence failures to the domain error payload.
///
/// `DuplicateUsername` is handled before this mapping wherever it is an
/// expected flow (registration); reaching it here means an operation hit the
/// constraint unexpectedly.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername => Error::conflict("username is already taken"),
    }
}

/// Map limerick store failures to the domain error payload.
pub(crate) fn map_limerick_store_error(error: LimerickStoreError) -> Error {
    match error {
        LimerickStoreError::NotFound { key } => {
            Error::not_found(format!("no stored limerick at {key}"))
        }
        LimerickStoreError::Io { message } => Error::internal(message),
    }
}
