//! Domain types shared by every adapter.
//!
//! Nothing here knows about HTTP frameworks; handlers serialize these
//! types as-is.

mod error_envelope;
mod health;
mod models;

pub use error_envelope::{AUTHENTICATION_ERROR, ErrorDetail, ErrorEnvelope, INTERNAL_ERROR};
pub use health::{
    HealthSnapshot, HealthStatus, LivenessReport, ReadinessReport, SERVICE_NAME,
    ServiceDescriptor, ServiceState, UPSTREAM_SERVICE, UPSTREAM_UNAVAILABLE, format_uptime,
};
pub use models::{
    ModelsEnvelope, OWNED_BY, PublicModel, UpstreamModel, UpstreamModelList, translate_models,
};
