// ---------------------------------------------------------------------------
// handlers/ — request capture endpoint and the shared error type
// ---------------------------------------------------------------------------

pub(crate) mod capture;

pub use capture::{build_record, capture_request};

use axum::Json;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::files::RecordError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for all handlers and extractors.
///
/// Response format:
/// ```json
/// { "detail": "Human-readable description" }
/// ```
/// `Unauthorized` additionally carries a `WWW-Authenticate: Basic` challenge.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `detail` field.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Unauthorized(m) | ApiError::Internal(m) => m,
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Unauthorized(_) => {
                tracing::warn!("API error ({}): {}", status.as_u16(), self)
            }
            ApiError::Internal(_) => {
                tracing::error!("API error ({}): {}", status.as_u16(), self)
            }
        }

        let body = Json(json!({ "detail": self.detail() }));
        match self {
            ApiError::Unauthorized(_) => (
                status,
                [(WWW_AUTHENTICATE, HeaderValue::from_static("Basic"))],
                body,
            )
                .into_response(),
            ApiError::Internal(_) => (status, body).into_response(),
        }
    }
}
