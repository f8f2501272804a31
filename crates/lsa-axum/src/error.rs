//! HTTP error boundary for the model listing.
//!
//! Callers only ever see the fixed envelopes; the underlying cause stays in
//! the server logs.

use std::time::Duration;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use lsa_core::{AuthError, ErrorEnvelope, UpstreamError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Auth Guard rejected the request.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// Upstream call failed, timed out or was cancelled.
    #[error("upstream failure: {0}")]
    Upstream(#[from] UpstreamError),

    /// Whole request outlived the server-side request ceiling.
    #[error("request exceeded {0:?}")]
    RequestTimeout(Duration),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RequestTimeout(_) => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Unauthorized(_) => {
                let mut res = (status, Json(ErrorEnvelope::authentication_required())).into_response();
                res.headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                res
            }
            Self::Upstream(_) => (status, Json(ErrorEnvelope::upstream_failure())).into_response(),
            Self::RequestTimeout(_) => {
                (status, Json(ErrorEnvelope::new("Request timed out", "timeout_error"))).into_response()
            }
        }
    }
}
