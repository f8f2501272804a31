//! LlamaStack client implementing [`UpstreamPort`].

use std::error::Error as _;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use lsa_core::domain::{PublicModel, UpstreamModelList, translate_models};
use lsa_core::ports::{UpstreamError, UpstreamPort};
use lsa_core::Clock;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::UpstreamClientConfig;
use crate::url::{HEALTH_PATH, MODELS_PATH, endpoint_url};

/// Upstream error bodies are cut to this many bytes before they reach logs.
const MAX_ERROR_BODY_BYTES: usize = 512;

/// Failure to construct the HTTP client.
#[derive(Debug, Error)]
#[error("failed to build upstream HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// reqwest-backed upstream client.
///
/// Holds a pooled `reqwest::Client`; cheap to share behind an `Arc`.
pub struct LlamaStackClient {
    http: reqwest::Client,
    models_url: String,
    health_url: String,
    api_key: Option<String>,
    clock: Arc<dyn Clock>,
}

impl LlamaStackClient {
    pub fn new(
        config: &UpstreamClientConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            models_url: endpoint_url(&config.base_url, MODELS_PATH),
            health_url: endpoint_url(&config.base_url, HEALTH_PATH),
            api_key: config.api_key.clone(),
            clock,
        })
    }

    pub fn models_url(&self) -> &str {
        &self.models_url
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    /// Build a GET request with optional authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(ref key) = self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }
        request
    }

    /// Send a GET and fail on any non-2xx status.
    async fn get_success(&self, url: &str) -> Result<reqwest::Response, UpstreamError> {
        let response = self
            .build_request(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(UpstreamError::Status {
            status: status.as_u16(),
            body: truncate_body(&body, MAX_ERROR_BODY_BYTES).to_string(),
        })
    }

    async fn fetch_models(&self) -> Result<Vec<PublicModel>, UpstreamError> {
        debug!(url = %self.models_url, "Fetching models from upstream");

        let response = self.get_success(&self.models_url).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        let list: UpstreamModelList =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode {
                reason: e.to_string(),
            })?;

        let models = translate_models(list.models, self.clock.now().timestamp());
        debug!(count = models.len(), "Converted upstream models to OpenAI format");
        Ok(models)
    }

    async fn probe_health(&self) -> Result<(), UpstreamError> {
        self.get_success(&self.health_url).await.map(|_| ())
    }
}

#[async_trait]
impl UpstreamPort for LlamaStackClient {
    async fn list_models(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<PublicModel>, UpstreamError> {
        cancellable(cancel, self.fetch_models()).await
    }

    async fn health(&self, cancel: &CancellationToken) -> Result<(), UpstreamError> {
        cancellable(cancel, self.probe_health()).await
    }
}

/// Race `call` against `cancel`; the call is dropped if the token fires.
async fn cancellable<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, UpstreamError>>,
) -> Result<T, UpstreamError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(UpstreamError::Cancelled),
        result = call => result,
    }
}

/// Map a reqwest transport failure, keeping the innermost cause.
fn transport_error(err: reqwest::Error) -> UpstreamError {
    let mut reason = if err.is_timeout() {
        format!("request timed out: {err}")
    } else {
        err.to_string()
    };
    if let Some(source) = err.source() {
        reason.push_str(": ");
        reason.push_str(&source.to_string());
    }
    UpstreamError::Unreachable { reason }
}

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
fn truncate_body(body: &str, max: usize) -> &str {
    if body.len() <= max {
        return body;
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
