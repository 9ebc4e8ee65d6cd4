//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use contactbook_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Handler error: an [`AppError`] plus transport-only extras.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub details: Option<serde_json::Value>,
    /// Seconds until the client may retry, sent as `Retry-After`.
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn rate_limited(retry_after: u64) -> Self {
        Self {
            error: AppError::rate_limited("Too many requests"),
            details: None,
            retry_after: Some(retry_after),
        }
    }

    pub fn with_details(error: AppError, details: serde_json::Value) -> Self {
        Self {
            error,
            details: Some(details),
            retry_after: None,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            details: None,
            retry_after: None,
        }
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Cache
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.error.kind);

        let message = if status.is_server_error() {
            tracing::error!(
                kind = %self.error.kind,
                error = ?self.error,
                "Internal server error"
            );
            "An internal error occurred".to_string()
        } else {
            self.error.message
        };

        let body = ApiErrorResponse {
            error: self.error.kind.to_string(),
            message,
            details: self.details,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = self.retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
