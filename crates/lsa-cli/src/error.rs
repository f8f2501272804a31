//! CLI error type and exit codes.

use lsa_axum::ServeError;
use lsa_core::ConfigError;
use lsa_upstream::ClientBuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bind or socket failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The upstream HTTP client could not be constructed.
    #[error(transparent)]
    Client(#[from] ClientBuildError),

    /// In-flight requests outlived the shutdown grace period.
    #[error("Shutdown error: {0}")]
    Shutdown(ServeError),
}

impl From<ServeError> for CliError {
    fn from(err: ServeError) -> Self {
        match err {
            ServeError::Io(e) => Self::Io(e),
            other @ ServeError::GraceExpired(_) => Self::Shutdown(other),
        }
    }
}

impl CliError {
    /// Map error to an exit code (see sysexits.h).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78, // EX_CONFIG
            Self::Io(_) => 74,     // EX_IOERR
            Self::Client(_) | Self::Shutdown(_) => 1,
        }
    }
}
