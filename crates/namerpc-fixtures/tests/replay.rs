//! Recorded-exchange replay driving a real `FetchProvider`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use namerpc_core::{
    FetchError, HttpRequest, HttpResponse, HttpTransport, NamingService, Provider,
    RequestArguments, ResolutionErrorCode,
};
use namerpc_fixtures::{
    expect_resolution_error_code, expect_spies_called, init_test_tracing, Exchange, FixtureMode,
    MockData, ReplayTransport, DEFAULT_URL, MAINNET_URL, ZILLIQA_URL,
};
use namerpc_http::FetchProvider;
use serde_json::json;

type ReplayProvider = FetchProvider<Arc<ReplayTransport>>;

fn replay_provider(name: NamingService, url: &str) -> (ReplayProvider, Arc<ReplayTransport>) {
    init_test_tracing();
    let replay = Arc::new(ReplayTransport::new());
    let provider = FetchProvider::with_transport(name, url, replay.clone());
    (provider, replay)
}

fn owner_call(selector: &str) -> RequestArguments {
    RequestArguments::new("eth_call").with_params(vec![
        json!({
            "data": format!("{selector}756e1a2b9c83d5c1e7b9c0d2bdb5c6b5d7e4b33c12a3e4c1c9f2a1c3b1d2e3f4"),
            "to": "0xd1e5b0ff1287aa9f9a268759062e4ab08b9dacbe"
        }),
        json!("latest"),
    ])
}

#[tokio::test]
async fn recorded_exchange_answers_exactly_once() {
    let (provider, replay) = replay_provider(NamingService::Uns, MAINNET_URL);
    replay.mock_api_calls("chain_id", MAINNET_URL);

    let result = provider.request(RequestArguments::new("eth_chainId")).await.unwrap();
    assert_eq!(result, json!("0x1"));
    assert!(replay.is_done());

    // nothing left to match: indistinguishable from an unreachable host
    let second = provider.request(RequestArguments::new("eth_chainId")).await;
    expect_resolution_error_code(second, ResolutionErrorCode::NamingServiceDown);
    expect_spies_called(&[&*replay], Some(2));
}

#[tokio::test]
async fn scenario_replays_every_exchange() {
    let (provider, replay) = replay_provider(NamingService::Uns, MAINNET_URL);
    replay.mock_api_calls("registry_owner_lookup", MAINNET_URL);
    assert_eq!(replay.pending(), 2);

    // answered out of recorded order: matching is by body, not position
    let resolver = provider.request(owner_call("0xc4d66de8")).await.unwrap();
    let owner = provider.request(owner_call("0x6352211e")).await.unwrap();

    assert_eq!(
        owner,
        json!("0x0000000000000000000000008aad44321a86b170879d7a244c1e8d360c99dda8")
    );
    assert_eq!(
        resolver,
        json!("0x000000000000000000000000b66dce2da6afaaa98f2013446dbcb0f4b0ab2842")
    );
    assert!(replay.is_done());
}

#[tokio::test]
async fn unmatched_params_leave_exchange_pending() {
    let (provider, replay) = replay_provider(NamingService::Uns, MAINNET_URL);
    replay.mock_api_calls("registry_owner_lookup", MAINNET_URL);

    let result = provider.request(owner_call("0xdeadbeef")).await;
    expect_resolution_error_code(result, ResolutionErrorCode::NamingServiceDown);
    assert_eq!(replay.pending(), 2);
}

#[tokio::test]
async fn recorded_error_reply_is_service_provider_error() {
    let (provider, replay) = replay_provider(NamingService::Uns, MAINNET_URL);
    replay.mock_api_calls("provider_rejects_project_id", MAINNET_URL);

    let err = provider
        .request(RequestArguments::new("net_version"))
        .await
        .unwrap_err();
    assert!(err.is_resolution(ResolutionErrorCode::ServiceProviderError));
    assert_eq!(
        err.metadata().unwrap()["providerMessage"],
        "invalid project id"
    );
}

#[tokio::test]
async fn zilliqa_scenario_against_its_own_base_url() {
    let (provider, replay) = replay_provider(NamingService::Zns, ZILLIQA_URL);
    replay.mock_api_calls("zilliqa_registry_state", ZILLIQA_URL);

    let args = RequestArguments::new("GetSmartContractSubState").with_params(vec![
        json!("9611c53be6d1b32058b2747bdececed7e1216793"),
        json!("records"),
        json!([]),
    ]);
    let state = provider.request(args).await.unwrap();
    let record = &state["records"]["0x08ab2ffa92966738c881a37d0d97f168d2e076d24639921762d0985ebaa62e31"];
    assert_eq!(record["arguments"][0], "0x2d418942dce1afa02d0733a2000c71b371a6ac07");
}

#[tokio::test]
async fn scenario_registered_for_another_base_does_not_match() {
    let (provider, replay) = replay_provider(NamingService::Uns, MAINNET_URL);
    replay.mock_api_calls("chain_id", ZILLIQA_URL);

    let result = provider.request(RequestArguments::new("eth_chainId")).await;
    expect_resolution_error_code(result, ResolutionErrorCode::NamingServiceDown);
    assert_eq!(replay.pending(), 1);
}

#[tokio::test]
async fn get_exchange_from_embedded_data() {
    let replay = ReplayTransport::new();
    replay.mock_api_calls("udapi_domain_metadata", DEFAULT_URL);

    let resp = replay
        .fetch(HttpRequest::get(format!("{DEFAULT_URL}/domains/brad.crypto")))
        .await
        .unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json().unwrap()["meta"]["type"], "UNS");
}

#[tokio::test]
async fn custom_mock_data() {
    let mut data = MockData::default();
    data.insert(
        "resolver_lookup",
        vec![Exchange::post(
            json!({"jsonrpc": "2.0", "id": "1", "method": "eth_getCode", "params": ["0xabc", "latest"]}),
            json!({"jsonrpc": "2.0", "id": "1", "result": "0x"}),
        )],
    );
    let (provider, replay) = replay_provider(NamingService::Ens, MAINNET_URL);
    replay.register_scenario(&data, "resolver_lookup", MAINNET_URL);

    let args = RequestArguments::new("eth_getCode").with_params(vec![json!("0xabc"), json!("latest")]);
    assert_eq!(provider.request(args).await.unwrap(), json!("0x"));
}

/// Stands in for the real network in live-mode tests.
struct LiveNetwork {
    calls: AtomicUsize,
}

#[async_trait]
impl HttpTransport for LiveNetwork {
    async fn fetch(&self, _req: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(HttpResponse::new(200, r#"{"jsonrpc":"2.0","id":"1","result":"0x89"}"#))
    }
}

#[tokio::test]
async fn live_mode_bypasses_recorded_exchanges() {
    let live = Arc::new(LiveNetwork {
        calls: AtomicUsize::new(0),
    });
    let replay = Arc::new(ReplayTransport::with_mode(FixtureMode::Live, live.clone()));
    replay.mock_api_calls("chain_id", MAINNET_URL);
    assert_eq!(replay.pending(), 0, "live mode must not register fixtures");

    let provider = FetchProvider::with_transport(NamingService::Uns, MAINNET_URL, replay.clone());
    let result = provider.request(RequestArguments::new("eth_chainId")).await.unwrap();

    assert_eq!(result, json!("0x89"));
    assert_eq!(live.calls.load(Ordering::Relaxed), 1);
    assert_eq!(replay.lookups(), 0);
}
