//! Transport seam between the client and the network.
//!
//! [`CustomerClient`](crate::CustomerClient) only builds [`Request`]s; a
//! [`Transport`] turns them into responses. The default implementation,
//! [`HttpTransport`], is backed by `reqwest`.

mod http;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::InvalidRequest;

pub use self::http::{HttpResponse, HttpTransport};

/// HTTP verbs used by the customers API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP verb.
    pub method: Method,
    /// Absolute URL, exactly as built by the client.
    pub url: String,
    /// JSON body, sent as-is when present.
    pub body: Option<Value>,
}

impl Request {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Something that can execute [`Request`]s.
///
/// The client's results are `Result<Self::Response, Self::Error>` with no
/// wrapping, so whatever a transport returns reaches the caller untouched.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Successful response object.
    type Response: Send;

    /// Failure type. Must be able to carry requests the client could not address.
    type Error: std::error::Error + From<InvalidRequest> + Send + Sync + 'static;

    /// Execute one request.
    ///
    /// # Errors
    ///
    /// Whatever the underlying transport reports.
    async fn execute(&self, request: Request) -> Result<Self::Response, Self::Error>;
}
