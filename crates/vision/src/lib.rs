//! Label-detection collaborator.
//!
//! [`LabelDetector`] is the seam the HTTP layer depends on; [`VisionClient`]
//! implements it against the Cloud Vision `images:annotate` REST endpoint.

pub mod client;
pub mod config;
pub mod detector;
pub mod error;

pub use client::VisionClient;
pub use config::{VisionAuth, VisionConfig, VisionConfigError};
pub use detector::LabelDetector;
pub use error::VisionError;
