//! namerpc-core — foundation traits and types for namerpc.
//!
//! # Overview
//!
//! namerpc is a thin JSON-RPC transport for naming-service backends. Every
//! call is one HTTP round trip, and every failure lands in a small, typed
//! taxonomy so callers can tell "the network is down" apart from "the remote
//! said no". The core crate defines:
//!
//! - [`Provider`] — the contract resolution logic depends on
//! - [`HttpTransport`] — the raw HTTP call primitive providers issue calls through
//! - [`RequestArguments`] / [`JsonRpcRequest`] / [`JsonRpcReply`] — wire types
//! - [`Error`] — tagged union over [`ResolutionError`], [`ConfigurationError`]
//!   and [`DnsRecordsError`]

pub mod error;
pub mod provider;
pub mod request;
pub mod transport;

pub use error::{
    BoxError, ConfigurationError, ConfigurationErrorCode, DnsRecordsError, DnsRecordsErrorCode,
    Error, ErrorKind, Metadata, ResolutionError, ResolutionErrorCode,
};
pub use provider::{NamingService, Provider};
pub use request::{JsonRpcReply, JsonRpcRequest, RequestArguments};
pub use transport::{FetchError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
