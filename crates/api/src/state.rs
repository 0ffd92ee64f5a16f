use std::sync::Arc;

use labelview_vision::LabelDetector;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Label detector, built once at startup and shared by every request.
    pub detector: Arc<dyn LabelDetector>,
}

impl AppState {
    pub fn new(config: ServerConfig, detector: Arc<dyn LabelDetector>) -> Self {
        Self {
            config: Arc::new(config),
            detector,
        }
    }
}
