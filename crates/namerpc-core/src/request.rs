//! JSON-RPC 2.0 wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version sent in every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Calls are never pipelined, so every envelope carries the same id.
pub const REQUEST_ID: &str = "1";

/// Input to a single provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestArguments {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
}

impl RequestArguments {
    /// A call without parameters.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: None,
        }
    }

    /// Attach positional parameters.
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = Some(params);
        self
    }
}

/// A JSON-RPC 2.0 request envelope.
///
/// Field order matters: it fixes the serialized body that recorded
/// exchanges are compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    /// Build the envelope for `args`; missing params become `[]`.
    pub fn from_args(args: &RequestArguments) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id: REQUEST_ID.into(),
            method: args.method.clone(),
            params: args.params.clone().unwrap_or_default(),
        }
    }

    /// Serialize to the HTTP request body.
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A decoded JSON-RPC reply. Exactly one arm is populated.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcReply {
    /// The remote rejected the call.
    Error { message: String },
    /// The call succeeded; the payload is left uninterpreted.
    Result(Value),
}

impl JsonRpcReply {
    /// Classify a decoded response body.
    ///
    /// Any populated `error` wins over `result`, whatever the HTTP status
    /// was. A body with neither field yields `Result(Null)`.
    pub fn from_value(mut value: Value) -> Self {
        if let Some(error) = value.get("error").filter(|e| is_populated(e)) {
            let message = match error.get("message") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            return Self::Error { message };
        }
        let result = value
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null);
        Self::Result(result)
    }

    /// Returns `true` if the remote reported an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Unwrap the result value or return the remote's message.
    pub fn into_result(self) -> Result<Value, String> {
        match self {
            Self::Error { message } => Err(message),
            Self::Result(value) => Ok(value),
        }
    }
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
