use axum::{
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Error returned by the JSON API. Serialized as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 400
    #[error("{0}")]
    BadRequest(String),

    /// HTTP 401
    #[error("invalid or missing secret")]
    Unauthorized,

    /// HTTP 404
    #[error("not found")]
    NotFound,

    /// HTTP 429, with `Retry-After`
    #[error("{message}")]
    RateLimited { message: String, retry_after_secs: u64 },

    /// HTTP 502: a dependency (CMS, webhook) failed
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));

        match self {
            ApiError::RateLimited { retry_after_secs, .. } => {
                (status, [(RETRY_AFTER, retry_after_secs.to_string())], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
