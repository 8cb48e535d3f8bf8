//! Provider doubles that count their calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use namerpc_core::error::Error;
use namerpc_core::provider::Provider;
use namerpc_core::request::RequestArguments;

use crate::case_table::{Case, CaseTable};
use crate::mode::{is_live, FixtureMode};
use crate::replay::ReplayTransport;

/// Anything that can report how often it was used.
pub trait Spy {
    fn calls(&self) -> usize;
}

impl<T, U> Spy for CaseTable<T, U>
where
    T: PartialEq + serde::Serialize,
    U: Clone,
{
    fn calls(&self) -> usize {
        CaseTable::calls(self)
    }
}

impl Spy for ReplayTransport {
    fn calls(&self) -> usize {
        self.lookups()
    }
}

type Responder = Box<dyn Fn(&RequestArguments) -> Result<Value, Error> + Send + Sync>;

/// Wraps a real provider. In recorded mode every call is answered by the
/// responder; in live mode every call goes to the wrapped provider and the
/// responder is never touched.
pub struct MockProvider<P> {
    inner: P,
    mode: FixtureMode,
    responder: Responder,
    calls: AtomicUsize,
    fixture_hits: AtomicUsize,
}

impl<P: Provider> MockProvider<P> {
    pub fn new<F>(inner: P, mode: FixtureMode, responder: F) -> Self
    where
        F: Fn(&RequestArguments) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self {
            inner,
            mode,
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            fixture_hits: AtomicUsize::new(0),
        }
    }

    /// Answer from a case table keyed by the full call arguments.
    /// An unmatched call panics.
    pub fn with_cases(inner: P, mode: FixtureMode, cases: Vec<Case<RequestArguments, Value>>) -> Self {
        let table = CaseTable::new(cases);
        Self::new(inner, mode, move |args| Ok(table.respond(args)))
    }

    /// Resolve every call with `value`.
    pub fn resolving(inner: P, mode: FixtureMode, value: Value) -> Self {
        Self::new(inner, mode, move |_| Ok(value.clone()))
    }

    /// Reject every call with a fresh error from `make_error`.
    pub fn rejecting<F, E>(inner: P, mode: FixtureMode, make_error: F) -> Self
    where
        F: Fn() -> E + Send + Sync + 'static,
        E: Into<Error>,
    {
        Self::new(inner, mode, move |_| Err(make_error().into()))
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Calls answered by the responder rather than the wrapped provider.
    pub fn fixture_hits(&self) -> usize {
        self.fixture_hits.load(Ordering::Relaxed)
    }
}

impl<P: Provider> Spy for MockProvider<P> {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl<P: Provider> Provider for MockProvider<P> {
    async fn request(&self, args: RequestArguments) -> Result<Value, Error> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.mode.is_live() {
            return self.inner.request(args).await;
        }
        self.fixture_hits.fetch_add(1, Ordering::Relaxed);
        (self.responder)(&args)
    }
}

/// Assert every spy was used, exactly `times` times when given.
/// Skipped in live mode, where call counts depend on the network.
pub fn expect_spies_called(spies: &[&dyn Spy], times: Option<usize>) {
    if is_live() {
        return;
    }
    for (i, spy) in spies.iter().enumerate() {
        match times {
            Some(n) => assert_eq!(spy.calls(), n, "spy #{i} call count"),
            None => assert!(spy.calls() > 0, "spy #{i} was never called"),
        }
    }
}
