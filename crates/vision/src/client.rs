//! REST client for the Cloud Vision `images:annotate` endpoint.
//!
//! Sends one `LABEL_DETECTION` request per image using [`reqwest`] and maps
//! the JSON response onto [`LabelSet`]. No timeout or retry policy is added
//! on top of the HTTP client defaults.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use labelview_core::label::{Label, LabelSet};
use serde::{Deserialize, Serialize};

use crate::config::{VisionAuth, VisionConfig};
use crate::detector::LabelDetector;
use crate::error::VisionError;

const LABEL_DETECTION: &str = "LABEL_DETECTION";

/// HTTP client for the label-detection service.
pub struct VisionClient {
    client: reqwest::Client,
    config: VisionConfig,
}

// ---- wire types ----

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    /// Base64-encoded image bytes.
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<Status>,
}

/// Zero-valued numbers are omitted from the service's JSON, hence the
/// default on `score`. `description` has no such excuse and is required.
#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    description: Option<String>,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl VisionClient {
    /// Create a client with its own connection pool.
    pub fn new(config: VisionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Annotate `image` and return its labels in service order.
    pub async fn annotate(&self, image: &[u8]) -> Result<LabelSet, VisionError> {
        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: LABEL_DETECTION,
                    max_results: self.config.max_results,
                }],
            }],
        };

        tracing::debug!(bytes = image.len(), "Sending label detection request");

        let request = self.client.post(&self.config.api_url).json(&body);
        let request = match &self.config.auth {
            VisionAuth::ApiKey(key) => request.query(&[("key", key)]),
            VisionAuth::BearerToken(token) => request.bearer_auth(token),
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(VisionError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let labels = parse_labels(&text)?;
        tracing::debug!(count = labels.len(), "Label detection completed");
        Ok(labels)
    }
}

#[async_trait]
impl LabelDetector for VisionClient {
    async fn detect_labels(&self, image: &[u8]) -> Result<LabelSet, VisionError> {
        self.annotate(image).await
    }
}

/// Decode an `images:annotate` response body into labels.
fn parse_labels(body: &str) -> Result<LabelSet, VisionError> {
    let response: AnnotateResponse = serde_json::from_str(body)
        .map_err(|e| VisionError::MalformedResponse(e.to_string()))?;

    let Some(first) = response.responses.into_iter().next() else {
        return Ok(Vec::new());
    };

    if let Some(status) = first.error {
        return Err(VisionError::Annotation {
            code: status.code,
            message: status.message,
        });
    }

    first
        .label_annotations
        .into_iter()
        .enumerate()
        .map(|(index, annotation)| {
            let description = annotation.description.ok_or_else(|| {
                VisionError::MalformedResponse(format!(
                    "label annotation {index} has no description"
                ))
            })?;
            Ok(Label::new(description, annotation.score))
        })
        .collect()
}
