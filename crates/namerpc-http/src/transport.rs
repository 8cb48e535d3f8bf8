//! `HttpTransport` implementation backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;

use namerpc_core::transport::{FetchError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Configuration for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Whole-request timeout. Expiry is reported as a network failure.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("namerpc/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// Plain HTTP transport: one request, one response, no retries.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an already configured client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

/// Requests `reqwest` refused to build are not network failures.
fn classify(e: reqwest::Error) -> FetchError {
    if e.is_builder() {
        FetchError::Unexpected(Box::new(e))
    } else {
        FetchError::Network(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn fetch(&self, req: HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = match req.method {
            HttpMethod::Get => self.http.get(&req.url),
            HttpMethod::Post => self.http.post(&req.url),
        };
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(classify)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(classify)?;
        Ok(HttpResponse { status, body })
    }
}
