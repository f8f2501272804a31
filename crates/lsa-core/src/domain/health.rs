//! Health, readiness and liveness report shapes.
//!
//! The three probes answer different questions and do not
//! share a response type: `/health` returns the full snapshot, `/ready` and
//! `/live` return terse objects for orchestration probes.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name this adapter reports about itself.
pub const SERVICE_NAME: &str = "llamastack-adapter";

/// Key of the upstream entry in [`HealthSnapshot::services`].
pub const UPSTREAM_SERVICE: &str = "upstream";

/// Reason reported by `/ready` when the upstream check fails.
///
/// Orchestrator checks match on this string; it names the backend product.
pub const UPSTREAM_UNAVAILABLE: &str = "llamastack_unavailable";

/// Overall status of a deep health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Status of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Up,
    Down,
}

/// Full `/health` response, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub services: BTreeMap<String, ServiceState>,
    pub version: String,
    pub uptime: String,
}

impl HealthSnapshot {
    /// Build a snapshot from the upstream check result.
    pub fn evaluate(
        upstream: ServiceState,
        timestamp: DateTime<Utc>,
        uptime: Duration,
        version: impl Into<String>,
    ) -> Self {
        let status = match upstream {
            ServiceState::Up => HealthStatus::Healthy,
            ServiceState::Down => HealthStatus::Unhealthy,
        };

        let mut services = BTreeMap::new();
        services.insert(UPSTREAM_SERVICE.to_string(), upstream);

        Self {
            status,
            timestamp,
            services,
            version: version.into(),
            uptime: format_uptime(uptime),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Terse `/ready` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ReadinessReport {
    pub const fn ready() -> Self {
        Self {
            ready: true,
            reason: None,
        }
    }

    pub fn upstream_unavailable() -> Self {
        Self {
            ready: false,
            reason: Some(UPSTREAM_UNAVAILABLE.to_string()),
        }
    }
}

/// `/live` response. Only ever constructed in the alive state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessReport {
    pub alive: bool,
    pub timestamp: DateTime<Utc>,
}

impl LivenessReport {
    pub const fn alive(timestamp: DateTime<Utc>) -> Self {
        Self {
            alive: true,
            timestamp,
        }
    }
}

/// Static description served from `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub service: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

impl ServiceDescriptor {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            version: version.into(),
            endpoints: vec![
                "GET /health - Service health check".to_string(),
                "GET /ready - Kubernetes readiness probe".to_string(),
                "GET /live - Kubernetes liveness probe".to_string(),
                "GET /v1/models - List available models (OpenAI compatible)".to_string(),
            ],
        }
    }
}

/// Render a duration as `1h2m3s`, dropping leading zero units.
///
/// Sub-second precision is discarded; a zero duration renders as `0s`.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{seconds}s");
    out
}
