use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagescopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The scoring service answered with an error. `status` is the HTTP status, or the
    /// `error.code` of an in-body failure when the service reported one.
    #[error("Scoring API error: {message}")]
    Api { status: Option<u16>, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PagescopeError {
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api { status, message: message.into() }
    }
}
