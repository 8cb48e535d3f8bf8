//! Well-known provider endpoints.
//!
//! With a project ID in the environment the Infura mainnet endpoint is
//! used, otherwise a free public one.

use std::env;

/// Environment variable holding the Infura project ID.
pub const INFURA_PROJECT_ID_ENV: &str = "NAMERPC_INFURA_PROJECT_ID";

const PUBLIC_HTTP_URL: &str = "https://main-rpc.linkpool.io";
const PUBLIC_WSS_URL: &str = "wss://main-rpc.linkpool.io/ws";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderProtocol {
    #[default]
    Http,
    Wss,
}

/// Mainnet endpoint for `protocol`, keyed by [`INFURA_PROJECT_ID_ENV`].
pub fn protocol_link(protocol: ProviderProtocol) -> String {
    let project_id = env::var(INFURA_PROJECT_ID_ENV).ok();
    protocol_link_with(project_id.as_deref(), protocol)
}

/// Mainnet endpoint for `protocol` with an explicit project ID.
/// An empty ID counts as absent.
pub fn protocol_link_with(project_id: Option<&str>, protocol: ProviderProtocol) -> String {
    match (project_id.filter(|id| !id.is_empty()), protocol) {
        (Some(id), ProviderProtocol::Http) => format!("https://mainnet.infura.io/v3/{id}"),
        (Some(id), ProviderProtocol::Wss) => format!("wss://mainnet.infura.io/ws/v3/{id}"),
        (None, ProviderProtocol::Http) => PUBLIC_HTTP_URL.into(),
        (None, ProviderProtocol::Wss) => PUBLIC_WSS_URL.into(),
    }
}
