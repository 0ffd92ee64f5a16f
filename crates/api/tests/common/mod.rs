#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use labelview_api::config::ServerConfig;
use labelview_api::router::build_app_router;
use labelview_api::state::AppState;
use labelview_core::label::{Label, LabelSet};
use labelview_vision::{LabelDetector, VisionError};
use tower::ServiceExt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

pub const BOUNDARY: &str = "labelview-test-boundary";

/// Build a test `ServerConfig` with the production upload limit.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router around `detector`.
pub fn build_test_app(detector: Arc<FakeDetector>) -> Router {
    build_test_app_with_config(detector, test_config())
}

pub fn build_test_app_with_config(detector: Arc<FakeDetector>, config: ServerConfig) -> Router {
    build_app_router(AppState::new(config, detector))
}

// ---------------------------------------------------------------------------
// Fake label detector
// ---------------------------------------------------------------------------

enum Outcome {
    Labels(LabelSet),
    Fail(String),
    Panic(&'static str),
}

/// A [`LabelDetector`] with a canned outcome that records every call.
pub struct FakeDetector {
    outcome: Outcome,
    calls: AtomicUsize,
    last_image: Mutex<Option<Vec<u8>>>,
}

impl FakeDetector {
    fn with_outcome(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_image: Mutex::new(None),
        })
    }

    pub fn returning(labels: Vec<Label>) -> Arc<Self> {
        Self::with_outcome(Outcome::Labels(labels))
    }

    /// Fails every call with an annotation error carrying `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Self::with_outcome(Outcome::Fail(message.to_string()))
    }

    pub fn panicking(message: &'static str) -> Arc<Self> {
        Self::with_outcome(Outcome::Panic(message))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_image(&self) -> Option<Vec<u8>> {
        self.last_image.lock().unwrap().clone()
    }
}

#[async_trait]
impl LabelDetector for FakeDetector {
    async fn detect_labels(&self, image: &[u8]) -> Result<LabelSet, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image.lock().unwrap() = Some(image.to_vec());

        match &self.outcome {
            Outcome::Labels(labels) => Ok(labels.clone()),
            Outcome::Fail(message) => Err(VisionError::Annotation {
                code: 7,
                message: message.clone(),
            }),
            Outcome::Panic(message) => panic!("{message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error event counting
// ---------------------------------------------------------------------------

/// Tracing layer that counts events at ERROR level.
#[derive(Clone, Default)]
pub struct ErrorEventCounter(Arc<AtomicUsize>);

impl ErrorEventCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorEventCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// One part of a multipart form.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

/// Encode `parts` as a `multipart/form-data` body delimited by [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Convenience: a body holding a single `image` file part.
pub fn image_form(filename: &str, data: &[u8]) -> Vec<u8> {
    multipart_body(&[Part::File {
        name: "image",
        filename,
        data,
    }])
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn content_type(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("content-type")
        .expect("missing content-type")
        .to_str()
        .unwrap()
}
