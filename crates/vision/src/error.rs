/// Errors from the label-detection layer.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("Vision request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Vision API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The request was accepted but annotating the image failed.
    #[error("Vision annotation failed ({code}): {message}")]
    Annotation { code: i32, message: String },

    /// The response did not have the expected shape.
    #[error("Malformed Vision response: {0}")]
    MalformedResponse(String),
}
