//! Health, readiness and liveness probes.
//!
//! The three handlers are independent: `/live` never touches the upstream,
//! and `/health` and `/ready` use their own ceilings.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use lsa_core::ports::with_ceiling;
use lsa_core::{HealthSnapshot, LivenessReport, ReadinessReport, ServiceState, VERSION};
use tracing::{debug, warn};

use crate::state::AppState;

/// `GET /health`: full snapshot, 503 when the upstream is down.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthSnapshot>) {
    let (cancel, _guard) = state.request_token();
    let upstream = match with_ceiling(state.timeouts.health, state.upstream.health(&cancel)).await
    {
        Ok(()) => ServiceState::Up,
        Err(e) => {
            warn!(kind = e.kind(), "Upstream health check failed: {e}");
            ServiceState::Down
        }
    };

    let snapshot = HealthSnapshot::evaluate(
        upstream,
        state.clock.now(),
        state.clock.elapsed(state.started_at),
        VERSION,
    );
    let status = if snapshot.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(snapshot))
}

/// `GET /ready`
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessReport>) {
    let (cancel, _guard) = state.request_token();
    match with_ceiling(state.timeouts.ready, state.upstream.health(&cancel)).await {
        Ok(()) => (StatusCode::OK, Json(ReadinessReport::ready())),
        Err(e) => {
            debug!(kind = e.kind(), "Readiness check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessReport::upstream_unavailable()),
            )
        }
    }
}

/// `GET /live`
pub async fn live(State(state): State<AppState>) -> Json<LivenessReport> {
    Json(LivenessReport::alive(state.clock.now()))
}
