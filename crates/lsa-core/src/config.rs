//! Adapter configuration.
//!
//! `AdapterConfig` is built once by the composition root and shared
//! read-only for the life of the process. Where the values come from
//! (flags, environment, `.env`) is the CLI's concern.

use thiserror::Error;
use url::Url;

use crate::auth::AuthPolicy;

/// Default listen host.
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

/// Startup configuration errors. Fatal before the listener starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("upstream endpoint is required (set LLAMASTACK_ENDPOINT)")]
    MissingUpstreamUrl,

    #[error("invalid upstream endpoint '{url}': {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("listen address must not be empty")]
    EmptyListenHost,
}

/// Immutable, process-lifetime adapter configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    upstream_url: Url,
    api_key: Option<String>,
    auth: AuthPolicy,
    listen_host: String,
    listen_port: u16,
}

impl AdapterConfig {
    pub fn builder() -> AdapterConfigBuilder {
        AdapterConfigBuilder::default()
    }

    /// Base URL of the upstream backend.
    pub const fn upstream_url(&self) -> &Url {
        &self.upstream_url
    }

    /// API key sent upstream, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub const fn auth(&self) -> AuthPolicy {
        self.auth
    }

    pub fn listen_host(&self) -> &str {
        &self.listen_host
    }

    pub const fn listen_port(&self) -> u16 {
        self.listen_port
    }

    /// `host:port` string suitable for binding a listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }
}

impl std::fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("upstream_url", &self.upstream_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("auth", &self.auth)
            .field("listen_host", &self.listen_host)
            .field("listen_port", &self.listen_port)
            .finish()
    }
}

/// Builder for [`AdapterConfig`].
///
/// # Example
///
/// ```
/// use lsa_core::AdapterConfig;
///
/// let config = AdapterConfig::builder()
///     .upstream_url("http://llamastack:8321")
///     .api_key(Some("secret".to_string()))
///     .enforce_auth(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.listen_addr(), "0.0.0.0:8080");
/// ```
#[derive(Debug, Clone)]
pub struct AdapterConfigBuilder {
    upstream_url: Option<String>,
    api_key: Option<String>,
    auth: AuthPolicy,
    listen_host: String,
    listen_port: u16,
}

impl Default for AdapterConfigBuilder {
    fn default() -> Self {
        Self {
            upstream_url: None,
            api_key: None,
            auth: AuthPolicy::Enforced,
            listen_host: DEFAULT_LISTEN_HOST.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
        }
    }
}

impl AdapterConfigBuilder {
    #[must_use]
    pub fn upstream_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn optional_upstream_url(mut self, url: Option<String>) -> Self {
        self.upstream_url = url;
        self
    }

    /// Set the upstream API key. An empty string counts as no key.
    #[must_use]
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    #[must_use]
    pub const fn enforce_auth(mut self, enforce: bool) -> Self {
        self.auth = AuthPolicy::from_flag(enforce);
        self
    }

    #[must_use]
    pub fn listen_host(mut self, host: impl Into<String>) -> Self {
        self.listen_host = host.into();
        self
    }

    #[must_use]
    pub const fn listen_port(mut self, port: u16) -> Self {
        self.listen_port = port;
        self
    }

    pub fn build(self) -> Result<AdapterConfig, ConfigError> {
        let raw = self
            .upstream_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUpstreamUrl)?;

        let upstream_url = parse_upstream_url(&raw)?;

        let listen_host = self.listen_host.trim().to_string();
        if listen_host.is_empty() {
            return Err(ConfigError::EmptyListenHost);
        }

        Ok(AdapterConfig {
            upstream_url,
            api_key: self.api_key.filter(|k| !k.is_empty()),
            auth: self.auth,
            listen_host,
            listen_port: self.listen_port,
        })
    }
}

fn parse_upstream_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidUpstreamUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment"));
    }
    Ok(url)
}
