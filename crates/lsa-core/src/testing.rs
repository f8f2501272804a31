//! Test doubles for adapter crates.
//!
//! Enabled with the `test-utils` feature.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;
use crate::domain::{PublicModel, UpstreamModel, translate_models};
use crate::ports::{UpstreamError, UpstreamPort};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Scripted upstream returning canned results.
///
/// An optional delay is applied before every answer; the delay honours the
/// cancellation token the same way the real client does.
#[derive(Clone)]
pub struct ScriptedUpstream {
    models: Result<Vec<UpstreamModel>, UpstreamError>,
    health: Result<(), UpstreamError>,
    delay: Option<Duration>,
    created: i64,
    list_calls: Arc<AtomicUsize>,
    health_calls: Arc<AtomicUsize>,
}

impl ScriptedUpstream {
    /// Healthy upstream with no models.
    pub fn new() -> Self {
        Self {
            models: Ok(Vec::new()),
            health: Ok(()),
            delay: None,
            created: 1_700_000_000,
            list_calls: Arc::new(AtomicUsize::new(0)),
            health_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Upstream that fails every call as unreachable.
    pub fn unreachable() -> Self {
        let err = UpstreamError::Unreachable {
            reason: "connection refused".to_string(),
        };
        Self::new()
            .with_models_result(Err(err.clone()))
            .with_health(Err(err))
    }

    #[must_use]
    pub fn with_models(self, ids: &[&str]) -> Self {
        self.with_models_result(Ok(ids.iter().map(|id| UpstreamModel::new(*id)).collect()))
    }

    #[must_use]
    pub fn with_models_result(mut self, models: Result<Vec<UpstreamModel>, UpstreamError>) -> Self {
        self.models = models;
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: Result<(), UpstreamError>) -> Self {
        self.health = health;
        self
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub const fn with_created(mut self, created: i64) -> Self {
        self.created = created;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    async fn wait(&self, cancel: &CancellationToken) -> Result<(), UpstreamError> {
        let Some(delay) = self.delay else {
            return Ok(());
        };
        tokio::select! {
            () = cancel.cancelled() => Err(UpstreamError::Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

impl Default for ScriptedUpstream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamPort for ScriptedUpstream {
    async fn list_models(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<PublicModel>, UpstreamError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(cancel).await?;
        self.models
            .clone()
            .map(|models| translate_models(models, self.created))
    }

    async fn health(&self, cancel: &CancellationToken) -> Result<(), UpstreamError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(cancel).await?;
        self.health.clone()
    }
}
