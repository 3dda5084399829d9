//! Handler outcome type.
//!
//! Every page handler returns an explicit decision — render a page, redirect
//! (optionally carrying a one-shot flash message), or stream an attachment —
//! and a single [`Responder`] implementation turns it into an HTTP response.
//! Keeping the mapping in one place means no handler touches status codes or
//! headers directly.

use std::borrow::Cow;

use actix_session::SessionExt;
use actix_web::body::BoxBody;
use actix_web::http::header::{
    self, ContentDisposition, DispositionParam, DispositionType,
};
use actix_web::{HttpRequest, HttpResponse, Responder};
use tracing::error;

use super::session::FLASH_KEY;

/// Decision produced by a page handler.
pub enum PageOutcome {
    /// Render an HTML page.
    Page {
        /// Complete HTML document.
        html: String,
    },
    /// Redirect the client, optionally leaving a flash message for the next
    /// rendered page.
    Redirect {
        /// Target path.
        location: Cow<'static, str>,
        /// One-shot message stored in the session at response time.
        flash: Option<String>,
    },
    /// Stream stored bytes back as a file attachment.
    Attachment {
        /// Filename offered to the client.
        filename: String,
        /// Blob contents.
        bytes: Vec<u8>,
    },
}

impl PageOutcome {
    /// Render the given HTML document.
    pub fn page(html: impl Into<String>) -> Self {
        Self::Page { html: html.into() }
    }

    /// Redirect without a message.
    pub fn redirect(location: impl Into<Cow<'static, str>>) -> Self {
        Self::Redirect {
            location: location.into(),
            flash: None,
        }
    }

    /// Redirect and flash a message on the next rendered page.
    pub fn redirect_with_flash(
        location: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self::Redirect {
            location: location.into(),
            flash: Some(message.into()),
        }
    }

    /// Stream the given bytes as a download.
    pub fn attachment(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::Attachment {
            filename: filename.into(),
            bytes,
        }
    }
}

impl Responder for PageOutcome {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            Self::Page { html } => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(html),
            Self::Redirect { location, flash } => {
                if let Some(message) = flash {
                    // Losing the flash only degrades the next page's banner;
                    // the redirect itself must still go out.
                    if let Err(err) = req.get_session().insert(FLASH_KEY, message) {
                        error!(error = %err, "failed to store flash message");
                    }
                }
                HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, location.into_owned()))
                    .finish()
            }
            Self::Attachment { filename, bytes } => HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(filename)],
                })
                .body(bytes),
        }
    }
}
