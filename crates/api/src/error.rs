use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use labelview_core::render::render_error_fragment;
use labelview_core::upload::describe_limit;
use labelview_vision::VisionError;

/// Message shown when the request carried no image.
pub const MISSING_FILE_MESSAGE: &str = "No file uploaded. Please go back and choose an image.";

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as an HTML `<h2>` fragment with its message escaped.
/// Server-side failures are logged exactly once, here.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request had no `image` file part.
    #[error("No file uploaded")]
    MissingFile,

    /// The uploaded file (or the request body) exceeded the size limit.
    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    /// The request body could not be parsed as a multipart form.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The label detector failed.
    #[error(transparent)]
    Vision(#[from] VisionError),

    /// Any other unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFile => {
                tracing::debug!("Request without an image file");
                (StatusCode::BAD_REQUEST, MISSING_FILE_MESSAGE.to_string())
            }
            AppError::PayloadTooLarge { limit } => {
                tracing::warn!(limit, "Rejected oversized upload");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!(
                        "File too large. The maximum upload size is {}.",
                        describe_limit(*limit)
                    ),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Malformed upload request");
                (StatusCode::BAD_REQUEST, format!("Bad request: {msg}"))
            }
            AppError::Vision(err) => {
                tracing::error!(error = ?err, "Error analyzing image");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error: {err}"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error: {msg}"),
                )
            }
        };

        (status, Html(render_error_fragment(&message))).into_response()
    }
}
