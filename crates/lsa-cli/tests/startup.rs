//! Startup wiring: connectivity check and serving over a real listener.

use std::time::Duration;

use lsa_cli::bootstrap::{STARTUP_CHECK_TIMEOUT, check_upstream};
use lsa_cli::{CliError, serve_on};
use lsa_core::AdapterConfig;
use lsa_core::testing::ScriptedUpstream;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio_test::assert_ok;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(upstream: &str, enforce_auth: bool) -> AdapterConfig {
    AdapterConfig::builder()
        .upstream_url(upstream)
        .enforce_auth(enforce_auth)
        .listen_host("127.0.0.1")
        .listen_port(0)
        .build()
        .unwrap()
}

#[tokio::test]
async fn connectivity_check_reports_result() {
    let cancel = CancellationToken::new();
    assert!(check_upstream(&ScriptedUpstream::new(), STARTUP_CHECK_TIMEOUT, &cancel).await);
    assert!(!check_upstream(&ScriptedUpstream::unreachable(), STARTUP_CHECK_TIMEOUT, &cancel).await);
}

#[tokio::test]
async fn connectivity_check_is_bounded() {
    let slow = ScriptedUpstream::new().with_delay(Duration::from_secs(30));
    let started = std::time::Instant::now();

    let ok = check_upstream(&slow, Duration::from_millis(100), &CancellationToken::new()).await;

    assert!(!ok);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn serves_with_unreachable_upstream() {
    // Nothing listens on the dropped port, so the startup check fails.
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_url = format!("http://{}", dead.local_addr().unwrap());
    drop(dead);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let shutdown = CancellationToken::new();
    let cfg = config(&dead_url, true);
    let server = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { serve_on(listener, &cfg, shutdown, Duration::from_secs(5)).await }
    });

    let live = reqwest::get(format!("{base}/live")).await.unwrap();
    assert_eq!(live.status(), reqwest::StatusCode::OK);

    let health = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(health.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let models = reqwest::get(format!("{base}/v1/models")).await.unwrap();
    assert_eq!(models.status(), reqwest::StatusCode::UNAUTHORIZED);

    shutdown.cancel();
    assert_ok!(server.await.unwrap());
}

#[tokio::test]
async fn end_to_end_models_listing() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"id": "llama-3.1-8b"}, {"id": "all-minilm"}]
        })))
        .mount(&upstream)
        .await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let shutdown = CancellationToken::new();
    let cfg = config(&format!("{}/", upstream.uri()), true);
    let server = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { serve_on(listener, &cfg, shutdown, Duration::from_secs(5)).await }
    });

    let body: Value = reqwest::Client::new()
        .get(format!("{base}/v1/models"))
        .bearer_auth("any-token")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["llama-3.1-8b", "all-minilm"]);

    shutdown.cancel();
    assert_ok!(server.await.unwrap());
}

#[tokio::test]
async fn shutdown_before_requests_is_clean() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    let result: Result<(), CliError> = serve_on(
        listener,
        &config("http://127.0.0.1:9", false),
        shutdown,
        Duration::from_secs(1),
    )
    .await;
    assert_ok!(result);
}
