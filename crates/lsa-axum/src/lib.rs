#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AdapterContext, DEFAULT_REQUEST_TIMEOUT, ProbeTimeouts, ServeError, serve};
pub use error::ApiError;
pub use middleware::ClientIp;
pub use routes::create_router;
pub use state::AppState;
