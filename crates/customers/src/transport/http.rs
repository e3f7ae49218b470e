//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{Method, Request, Transport};
use crate::error::{ConfigError, TransportError};
use crate::models::ApiError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Transport that sends requests over HTTP(S) with `reqwest`.
///
/// Non-2xx responses are reported as [`TransportError::Status`]. No retries,
/// no timeouts; configure those on the `reqwest::Client` passed to
/// [`HttpTransport::with_client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ConfigError::ClientBuild)?;

        Ok(Self { client })
    }

    /// Use a caller-built client (timeouts, proxies, TLS settings, ...).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    /// Build the error for a non-2xx response.
    fn status_error(status: StatusCode, body: &[u8]) -> TransportError {
        let text = String::from_utf8_lossy(body).into_owned();
        let api_error = serde_json::from_slice::<ApiError>(body).ok();

        let reason = || status.canonical_reason().unwrap_or_default().to_string();
        let message = match &api_error {
            Some(error) => error.message.clone().unwrap_or_else(reason),
            None if text.is_empty() => reason(),
            None => text.clone(),
        };

        TransportError::Status {
            status: status.as_u16(),
            message,
            body: text,
            api_error,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Response = HttpResponse;
    type Error = TransportError;

    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: Request) -> Result<HttpResponse, TransportError> {
        let url = reqwest::Url::parse(&request.url).map_err(|source| TransportError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;

        let mut builder = self.client.request(Self::method(request.method), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!("Sending customers API request");
        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            warn!(
                status = %status,
                body = %String::from_utf8_lossy(&body),
                "Customers API request failed"
            );
            return Err(Self::status_error(status, &body));
        }

        debug!(status = %status, bytes = body.len(), "Customers API request succeeded");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Response returned by [`HttpTransport`].
///
/// Holds the raw body; decoding is left to the caller.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether the response carried no body (e.g. a `204` from delete).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
