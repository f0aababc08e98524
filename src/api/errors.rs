use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::PagescopeError;

impl IntoResponse for PagescopeError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            PagescopeError::Config(_)
            | PagescopeError::InvalidTarget(_)
            | PagescopeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PagescopeError::Authentication(_) => StatusCode::UNAUTHORIZED,
            PagescopeError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

impl From<JsonRejection> for PagescopeError {
    fn from(rejection: JsonRejection) -> Self {
        PagescopeError::InvalidRequest(rejection.body_text())
    }
}
