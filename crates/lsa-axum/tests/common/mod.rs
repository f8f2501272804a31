//! Shared helpers for lsa-axum integration tests.

// Each test binary uses a different subset.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use lsa_axum::{AdapterContext, create_router};
use lsa_core::UpstreamPort;
use lsa_core::testing::FixedClock;
use serde_json::Value;
use tower::ServiceExt;

/// Process start time used by every test context.
pub fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// "Now" for every test context: 1h2m3s after [`started_at`].
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 13, 2, 3).unwrap()
}

/// Context with a pinned clock and auth enforced.
pub fn context(upstream: impl UpstreamPort + 'static) -> AdapterContext {
    AdapterContext::new(Arc::new(upstream), Arc::new(FixedClock(now())))
        .with_started_at(started_at())
}

pub fn router(ctx: AdapterContext) -> Router {
    create_router(Arc::new(ctx))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Send a request through the router in-process.
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

/// GET `uri` with optional extra headers.
pub async fn get(app: Router, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}
