//! Public configuration for the upstream client.

use std::time::Duration;

use lsa_core::AdapterConfig;

/// Default per-request timeout applied by the HTTP client itself.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`LlamaStackClient`](crate::LlamaStackClient).
///
/// # Example
///
/// ```
/// use lsa_upstream::UpstreamClientConfig;
/// use std::time::Duration;
///
/// let config = UpstreamClientConfig::new("http://llamastack:8321/")
///     .with_timeout(Duration::from_secs(10))
///     .with_api_key("secret");
/// ```
#[derive(Clone)]
pub struct UpstreamClientConfig {
    /// Base URL of the upstream backend
    pub(crate) base_url: String,
    /// Optional bearer credential for the upstream
    pub(crate) api_key: Option<String>,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl UpstreamClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("llamastack-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Build from the adapter configuration.
    pub fn from_adapter(config: &AdapterConfig) -> Self {
        Self::new(config.upstream_url().as_str())
            .with_optional_api_key(config.api_key().map(str::to_string))
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional key. Empty strings are dropped.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.is_empty());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl std::fmt::Debug for UpstreamClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
