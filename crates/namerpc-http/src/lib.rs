//! namerpc-http — JSON-RPC providers over HTTP, backed by `reqwest`.
//!
//! # Quick start
//! ```rust,no_run
//! use namerpc_core::{NamingService, Provider, RequestArguments};
//! use namerpc_http::endpoints::{protocol_link, ProviderProtocol};
//! use namerpc_http::FetchProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = FetchProvider::new(NamingService::Uns, protocol_link(ProviderProtocol::Http))?;
//! let _version = provider.request(RequestArguments::new("net_version")).await?;
//! # Ok(())
//! # }
//! ```

pub mod endpoints;
pub mod provider;
pub mod transport;

pub use provider::FetchProvider;
pub use transport::{HttpTransportConfig, ReqwestTransport};
