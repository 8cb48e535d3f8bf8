//! Case-table matching: first recorded request structurally equal to the
//! actual params wins.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

/// One recorded `request` → `response` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case<T, U> {
    pub request: T,
    pub response: U,
}

impl<T, U> Case<T, U> {
    pub fn new(request: T, response: U) -> Self {
        Self { request, response }
    }
}

/// Return the response of the first case whose request equals `params`.
///
/// # Panics
/// When no case matches. An unmatched call is a broken fixture, so this is
/// deliberately loud and outside the provider error taxonomy.
pub fn case_mock<T, U>(params: &T, cases: &[Case<T, U>]) -> U
where
    T: PartialEq + Serialize,
    U: Clone,
{
    match cases.iter().find(|case| case.request == *params) {
        Some(case) => case.response.clone(),
        None => panic!("got unexpected params {}", describe(params)),
    }
}

fn describe<T: Serialize>(params: &T) -> String {
    serde_json::to_string(params).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

/// A case table that counts how often it was consulted.
#[derive(Debug)]
pub struct CaseTable<T, U> {
    cases: Vec<Case<T, U>>,
    calls: AtomicUsize,
}

impl<T, U> CaseTable<T, U>
where
    T: PartialEq + Serialize,
    U: Clone,
{
    pub fn new(cases: Vec<Case<T, U>>) -> Self {
        Self {
            cases,
            calls: AtomicUsize::new(0),
        }
    }

    /// See [`case_mock`].
    pub fn respond(&self, params: &T) -> U {
        self.calls.fetch_add(1, Ordering::Relaxed);
        case_mock(params, &self.cases)
    }

    pub fn cases(&self) -> &[Case<T, U>] {
        &self.cases
    }

    /// Number of [`respond`](Self::respond) calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<T, U> FromIterator<(T, U)> for CaseTable<T, U>
where
    T: PartialEq + Serialize,
    U: Clone,
{
    fn from_iter<I: IntoIterator<Item = (T, U)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(req, resp)| Case::new(req, resp)).collect())
    }
}
