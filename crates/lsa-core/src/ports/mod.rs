//! Port definitions (trait abstractions) for external systems.
//!
//! Handlers depend on these traits; concrete implementations live in
//! adapter crates and are wired together at the composition root.

pub mod upstream;

#[cfg(any(test, feature = "test-utils"))]
pub use upstream::MockUpstreamPort;
pub use upstream::{UpstreamError, UpstreamPort, with_ceiling};
