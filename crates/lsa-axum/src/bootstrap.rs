//! Adapter context and server lifecycle.
//!
//! [`AdapterContext`] is everything a handler needs. [`serve`] runs the
//! router on a listener and owns the shutdown sequence.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lsa_core::{AuthPolicy, Clock, UpstreamPort};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{info, warn};

use crate::routes::create_router;

/// Whole-request ceiling. Kept above every per-route ceiling so the
/// handlers get to answer with their own envelopes first.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(35);

/// Ceilings applied by the handlers around each upstream call, plus the
/// router-level ceiling on the request as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeouts {
    /// `/v1/models`
    pub models: Duration,
    /// `/health`
    pub health: Duration,
    /// `/ready`
    pub ready: Duration,
    /// Any route, enforced by the router; answers 408.
    pub request: Duration,
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self {
            models: Duration::from_secs(30),
            health: Duration::from_secs(10),
            ready: Duration::from_secs(5),
            request: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ProbeTimeouts {
    /// Same upstream ceiling for every route. Handy in tests. The request
    /// ceiling keeps its default.
    pub const fn uniform(ceiling: Duration) -> Self {
        Self {
            models: ceiling,
            health: ceiling,
            ready: ceiling,
            request: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_request(mut self, ceiling: Duration) -> Self {
        self.request = ceiling;
        self
    }
}

/// Everything the handlers share.
pub struct AdapterContext {
    pub upstream: Arc<dyn UpstreamPort>,
    pub clock: Arc<dyn Clock>,
    /// Captured once at construction; the base for `/health` uptime.
    pub started_at: DateTime<Utc>,
    pub auth: AuthPolicy,
    pub timeouts: ProbeTimeouts,
    /// Parent of every per-request token. Cancelled when the shutdown
    /// grace period runs out.
    pub in_flight: CancellationToken,
}

impl AdapterContext {
    /// Context with auth enforced and default ceilings. The start time is
    /// read from `clock` now.
    pub fn new(upstream: Arc<dyn UpstreamPort>, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now();
        Self {
            upstream,
            clock,
            started_at,
            auth: AuthPolicy::default(),
            timeouts: ProbeTimeouts::default(),
            in_flight: CancellationToken::new(),
        }
    }

    #[must_use]
    pub const fn with_auth(mut self, auth: AuthPolicy) -> Self {
        self.auth = auth;
        self
    }

    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: ProbeTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    #[must_use]
    pub const fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Token for one request's upstream call.
    ///
    /// The returned guard cancels the token when dropped, so a handler
    /// future abandoned by a disconnecting client also abandons its call.
    pub fn request_token(&self) -> (CancellationToken, DropGuard) {
        let token = self.in_flight.child_token();
        let guard = token.clone().drop_guard();
        (token, guard)
    }
}

impl std::fmt::Debug for AdapterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterContext")
            .field("started_at", &self.started_at)
            .field("auth", &self.auth)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

/// Why [`serve`] stopped abnormally.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("in-flight requests still running after {0:?} grace period")]
    GraceExpired(Duration),
}

/// Serve the adapter until `shutdown` fires.
///
/// After the signal no new connections are accepted and in-flight requests
/// get `grace` to finish. When the grace period runs out their upstream
/// calls are cancelled and [`ServeError::GraceExpired`] is returned.
pub async fn serve(
    listener: TcpListener,
    ctx: AdapterContext,
    shutdown: CancellationToken,
    grace: Duration,
) -> Result<(), ServeError> {
    let addr = listener.local_addr()?;
    let ctx = Arc::new(ctx);
    let in_flight = ctx.in_flight.clone();

    let app = create_router(ctx);
    info!(%addr, "LlamaStack adapter listening");

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown.clone().cancelled_owned())
    .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result?;
            info!("Server stopped");
            return Ok(());
        }
        () = shutdown.cancelled() => {
            info!(grace_secs = grace.as_secs_f64(), "Shutdown requested, draining in-flight requests");
        }
    }

    if let Ok(result) = tokio::time::timeout(grace, &mut server).await {
        result?;
        info!("Server shut down gracefully");
        Ok(())
    } else {
        warn!(grace_secs = grace.as_secs_f64(), "Grace period expired, cancelling in-flight requests");
        in_flight.cancel();
        Err(ServeError::GraceExpired(grace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lsa_core::testing::{FixedClock, ScriptedUpstream};

    fn context() -> AdapterContext {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        AdapterContext::new(Arc::new(ScriptedUpstream::new()), Arc::new(clock))
    }

    #[test]
    fn defaults() {
        let ctx = context();
        assert!(ctx.auth.is_enforced());
        assert_eq!(ctx.timeouts.models, Duration::from_secs(30));
        assert_eq!(ctx.timeouts.health, Duration::from_secs(10));
        assert_eq!(ctx.timeouts.ready, Duration::from_secs(5));
        assert_eq!(ctx.timeouts.request, Duration::from_secs(35));
        assert!(ctx.timeouts.request > ctx.timeouts.models);
        assert_eq!(ctx.started_at, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn request_token_cancelled_on_guard_drop() {
        let ctx = context();
        let (token, guard) = ctx.request_token();
        assert!(!token.is_cancelled());
        drop(guard);
        assert!(token.is_cancelled());
        assert!(!ctx.in_flight.is_cancelled());
    }

    #[test]
    fn request_token_follows_in_flight() {
        let ctx = context();
        let (token, _guard) = ctx.request_token();
        ctx.in_flight.cancel();
        assert!(token.is_cancelled());
    }
}
