//! Bearer-token Auth Guard.
//!
//! The guard checks only that a credential is present and well-shaped.
//! Real token verification happens in front of the adapter.

use thiserror::Error;
use tracing::debug;

/// Case-sensitive scheme prefix, including the separating space.
const BEARER_PREFIX: &str = "Bearer ";

/// How many token characters may appear in debug logs.
const LOGGED_TOKEN_CHARS: usize = 10;

/// Whether `/v1/models` requires a bearer token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Requests must carry `Authorization: Bearer <token>`.
    #[default]
    Enforced,
    /// The guard is never consulted.
    Disabled,
}

impl AuthPolicy {
    pub const fn from_flag(enforce: bool) -> Self {
        if enforce { Self::Enforced } else { Self::Disabled }
    }

    pub const fn is_enforced(self) -> bool {
        matches!(self, Self::Enforced)
    }
}

/// Why a request was rejected. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("invalid Authorization header format")]
    MalformedHeader,

    #[error("empty bearer token")]
    EmptyToken,
}

impl AuthError {
    /// Stable short label for structured logs.
    pub const fn kind(self) -> &'static str {
        match self {
            Self::MissingHeader => "missing_header",
            Self::MalformedHeader => "malformed_header",
            Self::EmptyToken => "empty_token",
        }
    }
}

/// A token that passed the shape checks. Its value is never validated.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken<'a>(&'a str);

impl<'a> BearerToken<'a> {
    pub const fn as_str(&self) -> &'a str {
        self.0
    }

    /// Leading characters safe to put in a debug log.
    pub fn log_prefix(&self) -> String {
        self.0.chars().take(LOGGED_TOKEN_CHARS).collect()
    }
}

impl std::fmt::Debug for BearerToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BearerToken({}...)", self.log_prefix())
    }
}

/// Stateless Auth Guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthGuard;

impl AuthGuard {
    /// Validate a raw `Authorization` header value.
    ///
    /// `None` means the header was absent; a blank value counts as absent
    /// too. Any non-empty token after the `Bearer ` prefix is accepted.
    pub fn validate(header: Option<&str>) -> Result<BearerToken<'_>, AuthError> {
        let header = header
            .filter(|h| !h.trim().is_empty())
            .ok_or(AuthError::MissingHeader)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::MalformedHeader)?;

        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        let token = BearerToken(token);
        debug!(token_prefix = %token.log_prefix(), "Validated bearer token");
        Ok(token)
    }
}
