//! Recorded-exchange replay.
//!
//! [`ReplayTransport`] stands in for the network. Each registered exchange
//! answers at most one request; once consumed it is gone, and a request no
//! remaining exchange matches fails as a network failure, exactly like an
//! unreachable host.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use namerpc_core::transport::{FetchError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};

use crate::mock_data::{Exchange, MockData};
use crate::mode::FixtureMode;

struct Interceptor {
    base_url: String,
    exchange: Exchange,
    /// Canonical form of a POST exchange's body, computed at registration.
    canonical_request: Option<String>,
}

impl Interceptor {
    fn new(base_url: &str, exchange: Exchange) -> Self {
        let canonical_request = exchange.is_post().then(|| canonical_json(&exchange.request));
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            exchange,
            canonical_request,
        }
    }

    fn matches(&self, req: &HttpRequest) -> bool {
        match &self.canonical_request {
            Some(expected) => {
                req.method == HttpMethod::Post
                    && req.url.trim_end_matches('/') == self.base_url
                    && req
                        .body
                        .as_deref()
                        .and_then(|body| serde_json::from_str::<Value>(body).ok())
                        .map(|body| canonical_json(&body))
                        .as_deref()
                        == Some(expected.as_str())
            }
            None => {
                let path = self.exchange.request.as_str().unwrap_or_default();
                req.method == HttpMethod::Get && req.url == join_path(&self.base_url, path)
            }
        }
    }

    fn reply(self) -> HttpResponse {
        HttpResponse::new(200, self.exchange.response.to_string())
    }
}

/// Answers requests from one-shot recorded exchanges.
///
/// In live mode nothing is registered and every request goes to the live
/// transport untouched.
pub struct ReplayTransport {
    live: Option<Arc<dyn HttpTransport>>,
    interceptors: Mutex<Vec<Interceptor>>,
    lookups: AtomicUsize,
}

impl ReplayTransport {
    /// Always replays; there is no network behind it.
    pub fn new() -> Self {
        Self {
            live: None,
            interceptors: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Replay or pass through to `live`, depending on `mode`.
    pub fn with_mode(mode: FixtureMode, live: Arc<dyn HttpTransport>) -> Self {
        let mut transport = Self::new();
        if mode.is_live() {
            transport.live = Some(live);
        }
        transport
    }

    /// [`with_mode`](Self::with_mode) using the process-wide mode.
    pub fn from_env(live: Arc<dyn HttpTransport>) -> Self {
        Self::with_mode(FixtureMode::from_env(), live)
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Register one exchange against `base_url`. No-op in live mode.
    pub fn register(&self, base_url: &str, exchange: Exchange) {
        if self.is_live() {
            return;
        }
        self.lock().push(Interceptor::new(base_url, exchange));
    }

    /// Register every exchange of `scenario` from `data`, in order.
    ///
    /// # Panics
    /// If `data` has no such scenario.
    pub fn register_scenario(&self, data: &MockData, scenario: &str, base_url: &str) {
        if self.is_live() {
            return;
        }
        let exchanges = data
            .scenario(scenario)
            .unwrap_or_else(|| panic!("no recorded exchanges for scenario {scenario}"));
        let mut interceptors = self.lock();
        for exchange in exchanges {
            interceptors.push(Interceptor::new(base_url, exchange.clone()));
        }
    }

    /// Register `scenario` from the embedded fixture file.
    pub fn mock_api_calls(&self, scenario: &str, base_url: &str) {
        self.register_scenario(MockData::embedded(), scenario, base_url);
    }

    /// Exchanges registered but not yet consumed.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Every registered exchange has been consumed.
    pub fn is_done(&self) -> bool {
        self.pending() == 0
    }

    /// How many requests were checked against the recorded exchanges.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Interceptor>> {
        self.interceptors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn intercept(&self, req: &HttpRequest) -> Option<HttpResponse> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let mut interceptors = self.lock();
        let idx = interceptors.iter().position(|i| i.matches(req))?;
        let interceptor = interceptors.remove(idx);
        tracing::debug!(
            method = %req.method,
            url = %req.url,
            remaining = interceptors.len(),
            "recorded exchange consumed"
        );
        Some(interceptor.reply())
    }
}

impl Default for ReplayTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReplayTransport {
    async fn fetch(&self, req: HttpRequest) -> Result<HttpResponse, FetchError> {
        if let Some(live) = &self.live {
            return live.fetch(req).await;
        }
        match self.intercept(&req) {
            Some(resp) => Ok(resp),
            None => {
                tracing::warn!(
                    method = %req.method,
                    url = %req.url,
                    body = req.body.as_deref().unwrap_or_default(),
                    "no recorded exchange matches request"
                );
                Err(FetchError::Network(format!(
                    "no recorded exchange matches {} {}",
                    req.method, req.url
                )))
            }
        }
    }
}

/// Serialize with object keys sorted at every depth, so bodies compare
/// equal regardless of the order fields were written in.
pub fn canonical_json(value: &Value) -> String {
    canonicalize(value).to_string()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

fn join_path(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
