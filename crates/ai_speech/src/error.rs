//! Mapping of HTTP client failures onto [`ServiceError`]

use domain::{ServiceError, redact_secret};

/// Classify a transport-level reqwest failure
pub(crate) fn transport_error(err: reqwest::Error, provider: &str, api_key: &str) -> ServiceError {
    let detail = redact_secret(&err.to_string(), api_key);
    if err.is_timeout() {
        ServiceError::upstream_timeout(provider).with_detail(detail)
    } else if err.is_connect() {
        ServiceError::upstream_connection(provider).with_detail(detail)
    } else if err.is_body() || err.is_decode() {
        ServiceError::unknown(format!("Failed to read audio from {provider} API."))
            .with_detail(detail)
    } else {
        ServiceError::upstream_connection(provider).with_detail(detail)
    }
}
