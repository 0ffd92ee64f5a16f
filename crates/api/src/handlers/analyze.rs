//! Handler for image label analysis.

use axum::extract::State;
use axum::response::Html;
use labelview_core::render::render_label_page;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upload::ImageUpload;

/// POST /analyze
///
/// Accepts a multipart form with an `image` file field, sends the bytes to
/// the label detector once, and renders the labels as an HTML table.
pub async fn analyze(
    State(state): State<AppState>,
    ImageUpload(upload): ImageUpload,
) -> AppResult<Html<String>> {
    let image = upload.ok_or(AppError::MissingFile)?;

    tracing::info!(
        filename = %image.original_filename,
        bytes = image.declared_size(),
        "Analyzing uploaded image"
    );

    let labels = state.detector.detect_labels(&image.bytes).await?;

    tracing::info!(
        filename = %image.original_filename,
        labels = labels.len(),
        "Label detection succeeded"
    );

    Ok(Html(render_label_page(&image.original_filename, &labels)))
}
