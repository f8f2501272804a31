//! Request middleware: client IP resolution, access logging and the
//! whole-request ceiling.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::USER_AGENT;
use axum::http::{Extensions, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Best-effort caller address, inserted into request extensions by
/// [`access_log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl std::fmt::Display for ClientIp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the caller address.
///
/// First hop of `X-Forwarded-For`, then `X-Real-IP`, then the socket peer
/// if the server was started with connect info, else `"unknown"`.
pub fn client_ip(headers: &HeaderMap, extensions: &Extensions) -> ClientIp {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first) = header(X_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return ClientIp(first.to_string());
    }

    if let Some(real) = header(X_REAL_IP) {
        return ClientIp(real.to_string());
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(
            || ClientIp("unknown".to_string()),
            |ConnectInfo(addr)| ClientIp(addr.ip().to_string()),
        )
}

/// Emit one `info` line per request.
pub async fn access_log(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let ip = client_ip(req.headers(), req.extensions());
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    req.extensions_mut().insert(ip.clone());
    let response = next.run(req).await;

    info!(
        client_ip = %ip,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_secs_f64() * 1000.0,
        user_agent = %user_agent,
        "HTTP request"
    );

    response
}

/// Answer 408 when a request is still running after
/// `timeouts.request`. Dropping the handler future also drops its request
/// token guard, which cancels any upstream call it was waiting on.
pub async fn request_timeout(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let ceiling = state.timeouts.request;
    let path = req.uri().path().to_string();

    match tokio::time::timeout(ceiling, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(path = %path, ceiling_ms = ceiling.as_millis(), "Request timed out");
            ApiError::RequestTimeout(ceiling).into_response()
        }
    }
}
