//! The `HttpTransport` trait — the raw HTTP call primitive.
//!
//! A transport either hands back the response it received, whatever its
//! status, or reports *why* it could not. Network-level failures are kept
//! apart from everything else so providers can classify them without
//! masking unknown errors.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::error::BoxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// A `POST` carrying a JSON body.
    pub fn post_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body.into()),
            headers: vec![("Content-Type".into(), "application/json".into())],
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response that made it back over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON. A body that is not JSON counts as a
    /// network-level failure: the response never arrived intact.
    pub fn json(&self) -> Result<Value, FetchError> {
        serde_json::from_str(&self.body).map_err(FetchError::InvalidJson)
    }
}

/// Why a transport call produced no usable response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS failure, refused connection, timeout, broken body stream, or no
    /// recorded exchange to answer with.
    #[error("network failure: {0}")]
    Network(String),

    /// A response arrived but its body is not JSON.
    #[error("invalid JSON response body: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Anything else. Never reclassified by providers.
    #[error("{0}")]
    Unexpected(BoxError),
}

impl FetchError {
    /// Returns `true` for failures a provider reports as the naming
    /// service being down.
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::InvalidJson(_))
    }
}

/// The raw HTTP primitive every provider issues calls through.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn HttpTransport>`.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// Perform one HTTP exchange.
    async fn fetch(&self, req: HttpRequest) -> Result<HttpResponse, FetchError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn fetch(&self, req: HttpRequest) -> Result<HttpResponse, FetchError> {
        (**self).fetch(req).await
    }
}
