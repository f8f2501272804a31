//! Upstream port for listing models and probing backend health.
//!
//! This port defines the interface the HTTP handlers use to reach the
//! inference backend. Implementations own transport concerns (URLs,
//! credentials, client timeouts); callers own the per-request ceiling.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::PublicModel;

/// Errors that can occur while talking to the upstream backend.
///
/// The `Display` text is meant for logs only. Callers surface a fixed
/// category label instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Transport failure: DNS, refused connection, or a timeout.
    #[error("upstream unreachable: {reason}")]
    Unreachable { reason: String },

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream answered 2xx with a body that is not the expected JSON.
    #[error("failed to decode upstream response: {reason}")]
    Decode { reason: String },

    /// The caller abandoned the request before it completed.
    #[error("upstream request cancelled")]
    Cancelled,
}

impl UpstreamError {
    /// Timeout flavour of [`UpstreamError::Unreachable`].
    pub fn timed_out(after: Duration) -> Self {
        Self::Unreachable {
            reason: format!("timed out after {after:?}"),
        }
    }

    /// Stable short label for structured logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "upstream_unreachable",
            Self::Status { .. } => "upstream_status",
            Self::Decode { .. } => "upstream_decode",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Port for querying the upstream inference backend.
///
/// Every call performs exactly one outbound request; there are no retries
/// at this layer. The cancellation token aborts an in-flight call.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// List the upstream models, already translated to the OpenAI shape.
    ///
    /// The result has one entry per upstream record, in upstream order.
    async fn list_models(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<PublicModel>, UpstreamError>;

    /// Probe the upstream health endpoint. Any 2xx is healthy.
    async fn health(&self, cancel: &CancellationToken) -> Result<(), UpstreamError>;
}

/// Run an upstream call under a fixed ceiling.
///
/// The inner call keeps its own client timeout, so the effective bound is
/// whichever is shorter.
pub async fn with_ceiling<T, F>(ceiling: Duration, call: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    tokio::time::timeout(ceiling, call)
        .await
        .unwrap_or_else(|_| Err(UpstreamError::timed_out(ceiling)))
}
