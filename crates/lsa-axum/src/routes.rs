//! Route definitions and router construction.

use axum::Router;
use axum::http::{Method, header};
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::middleware::{access_log, request_timeout};
use crate::state::AppState;

/// Permissive CORS: any origin, the methods and headers browser clients
/// of an OpenAI-style API send.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Create the adapter router.
///
/// The access log is the outermost layer so CORS preflights and timed
/// out requests are logged too; preflights are answered by the CORS layer
/// without reaching a handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::index))
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/live", get(handlers::health::live))
        .route("/v1/models", get(handlers::models::list))
        .layer(middleware::from_fn_with_state(state.clone(), request_timeout))
        .layer(build_cors_layer())
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}
