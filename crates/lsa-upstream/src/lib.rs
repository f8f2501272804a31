#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod client;
mod config;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{ClientBuildError, LlamaStackClient};

// Configuration
pub use config::{DEFAULT_TIMEOUT, UpstreamClientConfig};

// URL helpers
pub use url::endpoint_url;
