//! Uploaded image type and upload constants.

use bytes::Bytes;

/// Multipart field that carries the image.
pub const IMAGE_FIELD: &str = "image";

/// Default maximum size of the uploaded file (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extra request-body allowance on top of the file limit for multipart
/// boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// An image received in a single request.
///
/// Owned by the request that produced it and dropped when the response is
/// sent. `original_filename` is client-supplied and untrusted.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_filename: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(original_filename: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            original_filename: original_filename.into(),
            bytes,
        }
    }

    /// Size of the uploaded file in bytes.
    pub fn declared_size(&self) -> usize {
        self.bytes.len()
    }
}

/// Whole-request body cap for a given file limit. Saturates instead of
/// overflowing for absurdly large limits.
pub fn request_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

/// Human-readable form of a byte limit, e.g. `5 MiB` or `512 KiB`.
pub fn describe_limit(limit: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;

    if limit >= MIB && limit % MIB == 0 {
        format!("{} MiB", limit / MIB)
    } else if limit >= KIB && limit % KIB == 0 {
        format!("{} KiB", limit / KIB)
    } else {
        format!("{limit} bytes")
    }
}
