use std::fmt;

/// Default Cloud Vision annotate endpoint.
pub const DEFAULT_VISION_API_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Credentials sent with every annotate request.
#[derive(Clone, PartialEq, Eq)]
pub enum VisionAuth {
    /// API key passed as the `key` query parameter.
    ApiKey(String),
    /// OAuth access token sent as `Authorization: Bearer ...`.
    BearerToken(String),
}

impl fmt::Debug for VisionAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionAuth::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            VisionAuth::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
        }
    }
}

/// Errors raised while loading [`VisionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum VisionConfigError {
    #[error("Missing Vision credentials: set GOOGLE_API_KEY or GOOGLE_ACCESS_TOKEN")]
    MissingCredentials,

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Label-detection client configuration.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Full URL of the `images:annotate` endpoint.
    pub api_url: String,
    pub auth: VisionAuth,
    /// Upper bound on returned labels. `None` leaves the service default.
    pub max_results: Option<u32>,
}

impl VisionConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default                                             |
    /// |-----------------------|-----------------------------------------------------|
    /// | `VISION_API_URL`      | `https://vision.googleapis.com/v1/images:annotate`  |
    /// | `GOOGLE_API_KEY`      | --                                                  |
    /// | `GOOGLE_ACCESS_TOKEN` | --                                                  |
    /// | `VISION_MAX_RESULTS`  | unset                                               |
    ///
    /// One of `GOOGLE_API_KEY` / `GOOGLE_ACCESS_TOKEN` is required. If both
    /// are set the API key is used.
    pub fn from_env() -> Result<Self, VisionConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`VisionConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VisionConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("VISION_API_URL").unwrap_or_else(|| DEFAULT_VISION_API_URL.into());

        let auth = match (non_empty("GOOGLE_API_KEY"), non_empty("GOOGLE_ACCESS_TOKEN")) {
            (Some(key), _) => VisionAuth::ApiKey(key),
            (None, Some(token)) => VisionAuth::BearerToken(token),
            (None, None) => return Err(VisionConfigError::MissingCredentials),
        };

        let max_results = match non_empty("VISION_MAX_RESULTS") {
            None => None,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(VisionConfigError::InvalidValue {
                        name: "VISION_MAX_RESULTS",
                        value: raw,
                        reason: "must be a positive integer",
                    })
                }
            },
        };

        Ok(Self {
            api_url,
            auth,
            max_results,
        })
    }
}
