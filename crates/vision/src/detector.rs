use async_trait::async_trait;
use labelview_core::label::LabelSet;

use crate::error::VisionError;

/// Anything that can turn raw image bytes into labels.
///
/// Implementations are built once at startup and shared across requests, so
/// they must be stateless from the caller's point of view.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detect labels in `image`. The returned order is the service's order.
    async fn detect_labels(&self, image: &[u8]) -> Result<LabelSet, VisionError>;
}
