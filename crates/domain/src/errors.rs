//! Service-level errors
//!
//! Every failure raised by a translation or speech adapter is normalised into a
//! [`ServiceError`] carrying a closed [`ErrorKind`], a human-readable message,
//! an HTTP-equivalent status code and an optional wrapped cause.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed error used as the optional cause of a [`ServiceError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Closed taxonomy of failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or rejected credential
    Authentication,
    /// Upstream rate limit exceeded
    RateLimit,
    /// Caller supplied an invalid request (unknown provider, failed validation)
    InvalidRequest,
    /// Upstream rejected the parameters, or input could not be processed
    BadRequest,
    /// Requested capability is not available
    ServiceUnavailable,
    /// Network-level failure reaching the upstream
    Connection,
    /// Upstream did not answer in time
    Timeout,
    /// Upstream answered with an unexpected error or payload
    ApiError,
    /// Anything else
    Unknown,
}

impl ErrorKind {
    /// Wire name rendered in the `type` field of error bodies
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication_error",
            Self::RateLimit => "rate_limit_error",
            Self::InvalidRequest => "invalid_request_error",
            Self::BadRequest => "bad_request_error",
            Self::ServiceUnavailable => "service_unavailable_error",
            Self::Connection => "connection_error",
            Self::Timeout => "timeout_error",
            Self::ApiError => "api_error",
            Self::Unknown => "unknown_error",
        }
    }

    /// Canonical status code for this kind
    #[must_use]
    pub const fn default_status(&self) -> u16 {
        match self {
            Self::Authentication => 401,
            Self::RateLimit => 429,
            Self::InvalidRequest | Self::BadRequest => 400,
            Self::ServiceUnavailable | Self::Connection => 503,
            Self::Timeout => 504,
            Self::ApiError | Self::Unknown => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain-text cause, used when the underlying failure is only known as text
#[derive(Debug, Error)]
#[error("{0}")]
struct Detail(String);

/// Structured error shared by every adapter
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceError {
    kind: ErrorKind,
    message: String,
    status_code: u16,
    #[source]
    cause: Option<BoxError>,
}

impl ServiceError {
    /// Create an error with the kind's default status code
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: kind.default_status(),
            cause: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn api_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApiError, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Override the status code
    ///
    /// Codes outside `400..=599` are ignored and the kind's default is kept.
    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        if (400..=599).contains(&status_code) {
            self.status_code = status_code;
        }
        self
    }

    /// Attach an underlying error as the cause
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Attach a textual cause
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.cause = Some(Box::new(Detail(detail.into())));
        self
    }

    /// Classify a non-2xx upstream HTTP status
    ///
    /// `provider` is the display name used in the message (e.g. "OpenAI").
    pub fn from_upstream_status(status: u16, provider: &str) -> Self {
        match status {
            401 => Self::authentication(format!(
                "Authentication failed with {provider} API. Please check your API key."
            )),
            429 => Self::rate_limit(format!(
                "{provider} API rate limit exceeded. Please try again later."
            )),
            400 => Self::bad_request(format!(
                "Invalid request to {provider} API. Please check your parameters."
            )),
            503 => Self::connection(format!(
                "{provider} API is currently unavailable. Please try again later."
            )),
            504 => Self::timeout(format!(
                "Request to {provider} API timed out. Please try again later."
            )),
            _ => Self::api_error(format!(
                "{provider} API returned an error (status {status})."
            )),
        }
    }

    /// Classify a non-2xx upstream response, keeping the upstream message as the cause
    ///
    /// The cause is the `error.message` field of an OpenAI-style JSON body when
    /// present, else the raw body, else the status. `secret` is redacted from it.
    pub fn from_upstream_response(status: u16, body: &str, provider: &str, secret: &str) -> Self {
        let detail = serde_json::from_str::<UpstreamErrorBody>(body)
            .map(|parsed| parsed.error.message)
            .ok()
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| format!("HTTP status {status}"));

        Self::from_upstream_status(status, provider).with_detail(redact_secret(&detail, secret))
    }

    /// Network-level connect failure towards `provider`
    pub fn upstream_connection(provider: &str) -> Self {
        Self::connection(format!(
            "Failed to connect to {provider} API. Please check your internet connection."
        ))
    }

    /// Timed-out call towards `provider`
    pub fn upstream_timeout(provider: &str) -> Self {
        Self::timeout(format!(
            "Request to {provider} API timed out. Please try again later."
        ))
    }

    /// Upstream answered 2xx but the payload did not have the expected shape
    pub fn unexpected_response(provider: &str) -> Self {
        Self::api_error(format!("Unexpected response format from {provider} API."))
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    #[must_use]
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// String form of the cause, as rendered in the `details` field
    #[must_use]
    pub fn details(&self) -> Option<String> {
        self.cause.as_ref().map(ToString::to_string)
    }
}

/// OpenAI-style error envelope, shared by every supported provider
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: UpstreamErrorDetail,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    message: String,
}

const REDACTED: &str = "[REDACTED]";

/// Replace every occurrence of `secret` in `text`
///
/// Secrets shorter than 4 characters are not searched for.
#[must_use]
pub fn redact_secret(text: &str, secret: &str) -> String {
    let secret = secret.trim();
    if secret.len() < 4 {
        return text.to_string();
    }
    text.replace(secret, REDACTED)
}
