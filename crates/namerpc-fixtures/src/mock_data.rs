//! Recorded HTTP exchanges, keyed by scenario name.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const EMBEDDED: &str = include_str!("../fixtures/mock_data.json");

/// One recorded HTTP exchange.
///
/// For `POST`, `request` is the JSON-RPC body; for any other method it is
/// the request path as a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    #[serde(rename = "METHOD")]
    pub method: String,
    #[serde(rename = "REQUEST")]
    pub request: Value,
    #[serde(rename = "RESPONSE")]
    pub response: Value,
}

impl Exchange {
    pub fn post(request: Value, response: Value) -> Self {
        Self {
            method: "POST".into(),
            request,
            response,
        }
    }

    pub fn get(path: impl Into<String>, response: Value) -> Self {
        Self {
            method: "GET".into(),
            request: Value::String(path.into()),
            response,
        }
    }

    /// Only an exact `POST` is a body-matched exchange; anything else,
    /// `post` included, is matched by path.
    pub fn is_post(&self) -> bool {
        self.method == "POST"
    }
}

/// Scenario name → ordered exchanges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockData {
    scenarios: HashMap<String, Vec<Exchange>>,
}

impl MockData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// `fixtures/mock_data.json`, parsed on first use.
    ///
    /// # Panics
    /// If the embedded file is not valid fixture JSON.
    pub fn embedded() -> &'static MockData {
        static DATA: OnceLock<MockData> = OnceLock::new();
        DATA.get_or_init(|| {
            Self::from_json(EMBEDDED)
                .unwrap_or_else(|e| panic!("fixtures/mock_data.json is malformed: {e}"))
        })
    }

    pub fn scenario(&self, name: &str) -> Option<&[Exchange]> {
        self.scenarios.get(name).map(Vec::as_slice)
    }

    pub fn insert(&mut self, name: impl Into<String>, exchanges: Vec<Exchange>) {
        self.scenarios.insert(name.into(), exchanges);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_data_parses() {
        let data = MockData::embedded();
        assert!(!data.is_empty());
        for name in data.names() {
            let exchanges = data.scenario(name).unwrap();
            assert!(!exchanges.is_empty(), "scenario {name} has no exchanges");
            for exchange in exchanges {
                if !exchange.is_post() {
                    assert!(exchange.request.is_string(), "{name}: non-POST request must be a path");
                }
            }
        }
    }

    #[test]
    fn parses_upper_case_fields() {
        let data = MockData::from_json(
            r#"{"scenario":[{"METHOD":"POST","REQUEST":{"method":"net_version"},"RESPONSE":{"result":"1"}}]}"#,
        )
        .unwrap();
        let exchanges = data.scenario("scenario").unwrap();
        assert_eq!(exchanges.len(), 1);
        assert!(exchanges[0].is_post());
        assert_eq!(exchanges[0].response["result"], "1");
        assert!(data.scenario("missing").is_none());
    }

    #[test]
    fn method_comparison_is_exact() {
        assert!(Exchange::post(Value::Null, Value::Null).is_post());
        let lower = Exchange {
            method: "post".into(),
            request: Value::String("/status".into()),
            response: Value::Null,
        };
        assert!(!lower.is_post());
        assert!(!Exchange::get("/status", Value::Null).is_post());
    }
}
