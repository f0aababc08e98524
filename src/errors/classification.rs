use serde::{Deserialize, Serialize};
use super::types::PagescopeError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

/// Coarse cause of a failed audit, carried on the item next to its `Error` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    Timeout,
    RateLimited,
    Unauthorized,
    MalformedResponse,
    ApiError,
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::Unauthorized => "unauthorized",
            Self::MalformedResponse => "malformed_response",
            Self::ApiError => "api_error",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PagescopeError {
    /// Classify this error to determine its type and whether it can be retried.
    ///
    /// Transient transport and service failures are retryable; anything caused by
    /// the request itself or the response content is not.
    pub fn classify(&self) -> ErrorClassification {
        let (error_type, retryable) = match self {
            PagescopeError::RateLimit(_) => ("RateLimitError", true),
            PagescopeError::Network(_) => ("NetworkError", true),
            PagescopeError::Timeout(_) => ("TimeoutError", true),
            // Client-side rejections (bad URL, bad key format) fail the same way every time
            PagescopeError::Api { status, .. } => ("ApiError", status.map_or(true, |s| s >= 500)),
            PagescopeError::Io(_) => ("IoError", true),
            PagescopeError::Authentication(_) => ("AuthenticationError", false),
            PagescopeError::MalformedResponse(_) => ("MalformedResponseError", false),
            PagescopeError::Config(_) => ("ConfigError", false),
            PagescopeError::InvalidTarget(_) => ("InvalidTargetError", false),
            PagescopeError::InvalidRequest(_) => ("InvalidRequestError", false),
            PagescopeError::Json(_) => ("JsonError", false),
            PagescopeError::Yaml(_) => ("YamlError", false),
            PagescopeError::Internal(_) => ("InternalError", false),
        };
        ErrorClassification { error_type, retryable }
    }

    /// Map this error onto the reason recorded for a failed audit item.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            PagescopeError::RateLimit(_) => FailureKind::RateLimited,
            PagescopeError::Timeout(_) => FailureKind::Timeout,
            PagescopeError::Authentication(_) => FailureKind::Unauthorized,
            PagescopeError::MalformedResponse(_) | PagescopeError::Json(_) => {
                FailureKind::MalformedResponse
            }
            PagescopeError::Api { .. } => FailureKind::ApiError,
            PagescopeError::Network(_) | PagescopeError::Io(_) => FailureKind::Network,
            _ => FailureKind::Internal,
        }
    }
}
