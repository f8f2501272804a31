#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod auth;
pub mod clock;
pub mod config;
pub mod domain;
pub mod ports;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use auth::{AuthError, AuthGuard, AuthPolicy, BearerToken};
pub use clock::{Clock, SystemClock};
pub use config::{AdapterConfig, AdapterConfigBuilder, ConfigError};
pub use domain::{
    ErrorDetail, ErrorEnvelope, HealthSnapshot, HealthStatus, LivenessReport, ModelsEnvelope,
    OWNED_BY, PublicModel, ReadinessReport, SERVICE_NAME, ServiceDescriptor, ServiceState,
    UPSTREAM_SERVICE, UpstreamModel, UpstreamModelList, format_uptime, translate_models,
};
pub use ports::{UpstreamError, UpstreamPort};

/// Adapter version reported by `/health` and `/`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
