//! Multipart upload extractor.
//!
//! [`ImageUpload`] runs before the handler body: it parses the multipart
//! form, keeps the first `image` file part and enforces the size limit while
//! streaming, so an oversized file never reaches the label detector.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use labelview_core::upload::{UploadedImage, IMAGE_FIELD};

use crate::error::AppError;
use crate::state::AppState;

/// The image part of an upload form, if one was sent.
///
/// Parts with other names, text parts named `image`, and any `image` parts
/// after the first are ignored. A request that is not `multipart/form-data`
/// has no parts at all. An empty file part with an empty filename
/// (a form submitted without choosing a file) counts as no file.
#[derive(Debug)]
pub struct ImageUpload(pub Option<UploadedImage>);

impl FromRequest<AppState> for ImageUpload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let limit = state.config.max_upload_bytes;

        // A form posted without multipart encoding (or with no body at all)
        // carries no file part.
        let mut multipart = match Multipart::from_request(req, state).await {
            Ok(multipart) => multipart,
            Err(MultipartRejection::InvalidBoundary(_)) => return Ok(Self(None)),
            Err(rejection) => return Err(AppError::BadRequest(rejection.body_text())),
        };

        let mut image = None;

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| classify_multipart_error(e, limit))?
        {
            if image.is_some() || field.name() != Some(IMAGE_FIELD) {
                continue;
            }
            let Some(filename) = field.file_name().map(str::to_owned) else {
                continue;
            };

            let bytes = read_limited(&mut field, limit).await?;
            if filename.is_empty() && bytes.is_empty() {
                continue;
            }

            tracing::debug!(%filename, bytes = bytes.len(), "Received image upload");
            image = Some(UploadedImage::new(filename, bytes));
        }

        Ok(Self(image))
    }
}

/// Read a field chunk by chunk, failing as soon as it grows past `limit`.
async fn read_limited(field: &mut Field<'_>, limit: usize) -> Result<Bytes, AppError> {
    let mut buf = BytesMut::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| classify_multipart_error(e, limit))?
    {
        if buf.len() + chunk.len() > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf.freeze())
}

/// The request body limit surfaces as a multipart error with status 413.
fn classify_multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::BadRequest(err.body_text())
    }
}
