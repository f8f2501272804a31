//! Probe endpoints and the service descriptor.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use lsa_axum::ProbeTimeouts;
use lsa_core::UpstreamError;
use lsa_core::ports::MockUpstreamPort;
use lsa_core::testing::ScriptedUpstream;
use serde_json::json;

use common::{context, get, router};

#[tokio::test]
async fn health_is_200_when_upstream_up() {
    let app = router(context(ScriptedUpstream::new()));
    let res = get(app, "/health", &[]).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({
            "status": "healthy",
            "timestamp": "2026-03-01T13:02:03Z",
            "services": {"upstream": "up"},
            "version": "1.0.0",
            "uptime": "1h2m3s"
        })
    );
}

#[tokio::test]
async fn health_is_503_when_upstream_down() {
    let app = router(context(ScriptedUpstream::unreachable()));
    let res = get(app, "/health", &[]).await;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["status"], "unhealthy");
    assert_eq!(res.body["services"]["upstream"], "down");
    assert_eq!(res.body["uptime"], "1h2m3s");
}

#[tokio::test]
async fn health_treats_error_status_as_down() {
    let upstream = ScriptedUpstream::new().with_health(Err(UpstreamError::Status {
        status: 500,
        body: String::new(),
    }));
    let res = get(router(context(upstream)), "/health", &[]).await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn health_ceiling_marks_upstream_down() {
    let upstream = ScriptedUpstream::new().with_delay(Duration::from_secs(30));
    let app = router(
        context(upstream).with_timeouts(ProbeTimeouts::uniform(Duration::from_millis(100))),
    );

    let res = get(app, "/health", &[]).await;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["services"]["upstream"], "down");
}

#[tokio::test]
async fn ready_reflects_upstream() {
    let up = get(router(context(ScriptedUpstream::new())), "/ready", &[]).await;
    assert_eq!(up.status, StatusCode::OK);
    assert_eq!(up.body, json!({"ready": true}));

    let down = get(router(context(ScriptedUpstream::unreachable())), "/ready", &[]).await;
    assert_eq!(down.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(down.body, json!({"ready": false, "reason": "llamastack_unavailable"}));
}

#[tokio::test]
async fn ready_and_health_bodies_differ() {
    let ready = get(router(context(ScriptedUpstream::unreachable())), "/ready", &[]).await;
    let health = get(router(context(ScriptedUpstream::unreachable())), "/health", &[]).await;

    assert_ne!(ready.body, health.body);
    assert!(ready.body.get("services").is_none());
    assert!(health.body.get("ready").is_none());
}

#[tokio::test]
async fn live_never_calls_upstream() {
    let mut upstream = MockUpstreamPort::new();
    upstream.expect_health().never();
    upstream.expect_list_models().never();

    let res = get(router(context(upstream)), "/live", &[]).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"alive": true, "timestamp": "2026-03-01T13:02:03Z"}));
}

#[tokio::test]
async fn live_is_200_with_unreachable_upstream() {
    let res = get(router(context(ScriptedUpstream::unreachable())), "/live", &[]).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["alive"], true);
}

#[tokio::test]
async fn probes_need_no_auth() {
    for path in ["/health", "/ready", "/live", "/"] {
        let res = get(router(context(ScriptedUpstream::new())), path, &[]).await;
        assert_eq!(res.status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn root_describes_service() {
    let res = get(router(context(ScriptedUpstream::new())), "/", &[]).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["service"], "llamastack-adapter");
    assert_eq!(res.body["version"], "1.0.0");
    let endpoints = res.body["endpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 4);
    assert!(endpoints.iter().any(|e| e.as_str().unwrap().starts_with("GET /v1/models")));
}

#[tokio::test]
async fn unknown_path_is_404() {
    let res = get(router(context(ScriptedUpstream::new())), "/v2/models", &[]).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
