//! namerpc-fixtures — deterministic stand-ins for live naming-service calls.
//!
//! Two substitution strategies, both bypassed in live mode:
//!
//! - [`case_table`] — answer by deep structural match of the call's params
//!   against recorded `{request, response}` pairs
//! - [`replay`] — an [`HttpTransport`](namerpc_core::HttpTransport) that
//!   answers from one-shot recorded HTTP exchanges, keyed by scenario name
//!
//! Plus the helpers tests lean on: [`mode`] (live-mode toggle), [`spy`]
//! (counting provider doubles) and [`assertions`] (error kind/code checks).

pub mod assertions;
pub mod case_table;
pub mod mock_data;
pub mod mode;
pub mod replay;
pub mod spy;

pub use assertions::{
    expect_configuration_error_code, expect_dns_records_error_code, expect_error,
    expect_resolution_error_code,
};
pub use case_table::{case_mock, Case, CaseTable};
pub use mock_data::{Exchange, MockData};
pub use mode::{is_live, pending_in_live, FixtureMode, LIVE_ENV};
pub use replay::ReplayTransport;
pub use spy::{expect_spies_called, MockProvider, Spy};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const MAINNET_URL: &str = "https://mainnet.infura.io";
pub const ZILLIQA_URL: &str = "https://api.zilliqa.com";
pub const DEFAULT_URL: &str = "https://unstoppabledomains.com/api/v1";

/// Route `tracing` output through the test harness. Filter comes from
/// `RUST_LOG` (default `warn`). Safe to call from every test.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}
