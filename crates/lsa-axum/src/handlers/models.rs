//! `GET /v1/models`.

use std::time::Instant;

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use lsa_core::ports::with_ceiling;
use lsa_core::{AuthError, AuthGuard, ModelsEnvelope};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::middleware::ClientIp;
use crate::state::AppState;

/// List upstream models in the OpenAI shape.
pub async fn list(
    State(state): State<AppState>,
    Extension(client_ip): Extension<ClientIp>,
    headers: HeaderMap,
) -> Result<Json<ModelsEnvelope>, ApiError> {
    let start = Instant::now();
    info!(client_ip = %client_ip, "Models request");

    if state.auth.is_enforced() {
        if let Err(e) = authorize(&headers) {
            warn!(client_ip = %client_ip, reason = e.kind(), "Rejected models request: {e}");
            return Err(e.into());
        }
    }

    let (cancel, _guard) = state.request_token();
    let models = with_ceiling(state.timeouts.models, state.upstream.list_models(&cancel))
        .await
        .map_err(|e| {
            error!(
                client_ip = %client_ip,
                kind = e.kind(),
                duration_ms = start.elapsed().as_millis(),
                "Failed to fetch models from upstream: {e}"
            );
            ApiError::from(e)
        })?;

    info!(
        client_ip = %client_ip,
        count = models.len(),
        duration_ms = start.elapsed().as_millis(),
        "Returned models"
    );
    Ok(Json(ModelsEnvelope::new(models)))
}

/// Run the Auth Guard over the raw `Authorization` header.
///
/// A value that is not visible ASCII counts as malformed.
fn authorize(headers: &HeaderMap) -> Result<(), AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .map(|v| v.to_str().map_err(|_| AuthError::MalformedHeader))
        .transpose()?;
    AuthGuard::validate(header).map(|_| ())
}
