//! API error handling
//!
//! Renders a [`ServiceError`] at the HTTP boundary. The translation path
//! uses the structured body `{"error": {"type", "message", "details"}}`;
//! the speech path flattens the same error into `{"detail": message}`.
//! Both keep the error's own status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::ServiceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::middleware::ValidationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rendered as the structured error body
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Rendered as a flat `{"detail": ...}` body
    #[error(transparent)]
    Speech(ServiceError),
}

impl ApiError {
    /// Wrap an error raised on the speech path
    #[must_use]
    pub const fn speech(err: ServiceError) -> Self {
        Self::Speech(err)
    }

    /// The underlying service error
    #[must_use]
    pub const fn service_error(&self) -> &ServiceError {
        match self {
            Self::Service(err) | Self::Speech(err) => err,
        }
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.service_error().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Service(err.into())
    }
}

/// Structured error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Fields of the structured error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Wire name of the error kind
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Text of the wrapped cause, `null` when there is none
    pub details: Option<String>,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: ErrorBody {
                kind: err.kind().as_str().to_string(),
                message: err.message().to_string(),
                details: err.details(),
            },
        }
    }
}

/// Flattened error body used by the speech endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err = self.service_error();

        if status.is_server_error() {
            error!(
                kind = err.kind().as_str(),
                status = status.as_u16(),
                details = ?err.details(),
                "{}",
                err.message()
            );
        } else {
            warn!(
                kind = err.kind().as_str(),
                status = status.as_u16(),
                "{}",
                err.message()
            );
        }

        match &self {
            Self::Service(err) => (status, Json(ErrorResponse::from(err))).into_response(),
            Self::Speech(err) => (
                status,
                Json(DetailResponse {
                    detail: err.message().to_string(),
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use domain::ErrorKind;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn error_response_serialization() {
        let err = ServiceError::rate_limit("Slow down");
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(json["error"]["type"], "rate_limit_error");
        assert_eq!(json["error"]["message"], "Slow down");
        assert!(json["error"]["details"].is_null());
    }

    #[test]
    fn error_response_with_details() {
        let err = ServiceError::api_error("Upstream broke").with_detail("502 from proxy");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.error.details.as_deref(), Some("502 from proxy"));
    }

    #[test]
    fn status_follows_service_error() {
        let err = ApiError::from(ServiceError::timeout("slow"));
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);

        let err = ApiError::speech(ServiceError::authentication("no key"));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn service_error_is_preserved() {
        let err = ApiError::speech(ServiceError::connection("down"));
        assert_eq!(err.service_error().kind(), ErrorKind::Connection);
        assert_eq!(err.to_string(), "down");
    }

    #[tokio::test]
    async fn into_response_structured_body() {
        let err = ApiError::from(ServiceError::invalid_request("Unsupported provider: foo"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(json["error"]["message"], "Unsupported provider: foo");
    }

    #[tokio::test]
    async fn into_response_speech_is_flattened() {
        let err = ApiError::speech(ServiceError::rate_limit("Too many requests"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"detail": "Too many requests"}));
    }

    #[tokio::test]
    async fn into_response_internal() {
        let response = ApiError::from(ServiceError::unknown("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
