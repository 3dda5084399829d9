//! Limerick upload and download handlers.
//!
//! ```text
//! POST /upload     multipart form, field `file`, filename Limerick.txt
//! GET  /download   stream the stored blob back as an attachment
//! ```

use actix_multipart::Multipart;
use actix_web::{get, post, web};
use futures_util::TryStreamExt;
use tracing::info;

use crate::domain::{Error, LimerickMetadata, limerick};

use super::error::{map_limerick_store_error, map_user_persistence_error};
use super::outcome::PageOutcome;
use super::session::SessionContext;
use super::state::HttpState;
use super::{ApiResult, messages, paths};

/// The `file` part of the upload form, once located in the multipart stream.
struct FilePart {
    filename: Option<String>,
    bytes: Vec<u8>,
}

fn bad_multipart(err: actix_multipart::MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart payload: {err}"))
}

/// Walk the multipart stream and collect the first part named `file`.
///
/// Other parts are drained and ignored; the upload form only carries one
/// field.
async fn file_part(mut payload: Multipart) -> ApiResult<Option<FilePart>> {
    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        if field.name() != Some("file") {
            while let Some(_chunk) = field.try_next().await.map_err(bad_multipart)? {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some(FilePart { filename, bytes }));
    }

    Ok(None)
}

/// Store the uploaded limerick and recompute its word count.
///
/// The blob write and the metadata update are two separate store calls with
/// no rollback; the metadata always reflects the last completed update.
#[post("/upload")]
pub async fn upload(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<PageOutcome> {
    let username = session.require_username()?;

    let Some(part) = file_part(payload).await? else {
        return Ok(PageOutcome::redirect_with_flash(
            paths::PROFILE,
            messages::NO_FILE_PART,
        ));
    };

    let filename = part.filename.unwrap_or_default();
    if filename.is_empty() {
        return Ok(PageOutcome::redirect_with_flash(
            paths::PROFILE,
            messages::NO_FILE_SELECTED,
        ));
    }
    if !limerick::is_expected_upload_name(&filename) {
        return Ok(PageOutcome::redirect_with_flash(
            paths::PROFILE,
            messages::WRONG_FILENAME,
        ));
    }

    let key = limerick::storage_key(&username);
    let word_count = limerick::word_count(&part.bytes);

    state
        .limericks
        .save(&key, part.bytes)
        .await
        .map_err(map_limerick_store_error)?;
    state
        .users
        .update_limerick(
            &username,
            &LimerickMetadata {
                filename: key,
                word_count,
            },
        )
        .await
        .map_err(map_user_persistence_error)?;

    info!(username = %username, word_count, "limerick stored");
    Ok(PageOutcome::redirect(paths::PROFILE))
}

/// Stream the stored limerick back to its owner.
#[get("/download")]
pub async fn download(
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
        session.purge();
        return Ok(PageOutcome::redirect(paths::LOGIN));
    };

    let Some(limerick) = user.limerick() else {
        return Ok(PageOutcome::redirect_with_flash(
            paths::PROFILE,
            messages::NO_UPLOADED_FILE,
        ));
    };

    let bytes = state
        .limericks
        .read(&limerick.filename)
        .await
        .map_err(map_limerick_store_error)?;

    Ok(PageOutcome::attachment(limerick.filename.clone(), bytes))
}
