//! JSON-RPC provider that posts envelopes over an [`HttpTransport`].

use async_trait::async_trait;
use serde_json::Value;

use namerpc_core::error::{Error, ResolutionError};
use namerpc_core::provider::{NamingService, Provider};
use namerpc_core::request::{JsonRpcReply, JsonRpcRequest, RequestArguments};
use namerpc_core::transport::{FetchError, HttpRequest, HttpTransport};

use crate::transport::{HttpTransportConfig, ReqwestTransport};

/// Sends each call as a single JSON-RPC 2.0 `POST` to `url`.
///
/// Failures are split into two disjoint paths:
/// - the transport could not complete → `NamingServiceDown` naming `name`
/// - the remote answered with `error` → `ServiceProviderError` carrying its message
///
/// Anything else the transport reports is passed through as
/// [`Error::Unexpected`].
pub struct FetchProvider<T = ReqwestTransport> {
    name: NamingService,
    url: String,
    transport: T,
}

impl FetchProvider<ReqwestTransport> {
    /// Provider over a default-configured `reqwest` transport.
    pub fn new(name: NamingService, url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::new(HttpTransportConfig::default())?;
        Ok(Self::with_transport(name, url, transport))
    }
}

impl<T: HttpTransport> FetchProvider<T> {
    pub fn with_transport(name: NamingService, url: impl Into<String>, transport: T) -> Self {
        Self {
            name,
            url: url.into(),
            transport,
        }
    }

    pub fn name(&self) -> NamingService {
        self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch_json(&self, args: &RequestArguments) -> Result<JsonRpcReply, Error> {
        let body = JsonRpcRequest::from_args(args)
            .to_body()
            .map_err(|e| Error::Unexpected(Box::new(e)))?;

        tracing::debug!(url = %self.url, method = %args.method, "sending JSON-RPC request");

        let decoded = match self.transport.fetch(HttpRequest::post_json(&self.url, body)).await {
            Ok(resp) => resp.json(),
            Err(e) => Err(e),
        };

        match decoded {
            Ok(json) => Ok(JsonRpcReply::from_value(json)),
            Err(e) if e.is_network_failure() => {
                tracing::warn!(
                    url = %self.url,
                    service = %self.name,
                    method = %args.method,
                    error = %e,
                    "naming service unreachable"
                );
                Err(ResolutionError::naming_service_down(self.name).into())
            }
            Err(FetchError::Unexpected(e)) => Err(Error::Unexpected(e)),
            Err(e) => Err(Error::Unexpected(Box::new(e))),
        }
    }
}

#[async_trait]
impl<T: HttpTransport> Provider for FetchProvider<T> {
    async fn request(&self, args: RequestArguments) -> Result<Value, Error> {
        match self.fetch_json(&args).await? {
            JsonRpcReply::Error { message } => {
                tracing::debug!(
                    url = %self.url,
                    method = %args.method,
                    provider_message = %message,
                    "JSON-RPC error reply"
                );
                Err(ResolutionError::service_provider_error(message).into())
            }
            JsonRpcReply::Result(value) => Ok(value),
        }
    }
}
