//! Error types for the customers client.

use thiserror::Error;

use crate::models::ApiError;

/// A request the client cannot address.
///
/// The client never returns this directly. It is converted into the
/// transport's own error type, so callers only ever see one error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    /// The customer has no `id`, so there is no resource to address.
    #[error("customer has no id")]
    MissingId,

    /// The customer id is an empty string.
    #[error("customer id is empty")]
    EmptyId,
}

/// Errors raised by [`HttpTransport`](crate::transport::HttpTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be addressed
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequest),

    /// The request URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP request failed (connection, TLS, body read, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Status {
        status: u16,
        message: String,
        body: String,
        api_error: Option<ApiError>,
    },
}

impl TransportError {
    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().as_ref().map(reqwest::StatusCode::as_u16),
            Self::InvalidRequest(_) | Self::InvalidUrl { .. } => None,
        }
    }

    /// Whether the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Structured error body returned by the customers service, if any.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Status { api_error, .. } => api_error.as_ref(),
            _ => None,
        }
    }
}

/// Errors that can occur while constructing a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No base URL in the environment
    #[error("API base URL not configured: set {primary} or {fallback}")]
    MissingBaseUrl {
        primary: &'static str,
        fallback: &'static str,
    },

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        let err = TransportError::Status {
            status: 404,
            message: "customer with id [7] not found".to_string(),
            body: String::new(),
            api_error: None,
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(err.api_error().is_none());
        assert_eq!(
            err.to_string(),
            "API error: 404 - customer with id [7] not found"
        );
    }

    #[test]
    fn test_invalid_request_has_no_status() {
        let err = TransportError::from(InvalidRequest::MissingId);
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Invalid request: customer has no id");
    }

    #[test]
    fn test_missing_base_url_message() {
        let err = ConfigError::MissingBaseUrl {
            primary: "API_BASE_URL",
            fallback: "VITE_API_BASE_URL",
        };
        assert_eq!(
            err.to_string(),
            "API base URL not configured: set API_BASE_URL or VITE_API_BASE_URL"
        );
    }
}
