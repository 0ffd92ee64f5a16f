use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::analyze;
use crate::state::AppState;

/// ```text
/// POST   /analyze       analyze (multipart)
/// ```
///
/// `body_limit` caps the whole request body; the per-file limit is enforced
/// by the upload extractor.
pub fn router(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze::analyze))
        .layer(DefaultBodyLimit::max(body_limit))
}
