//! Composition root: wires config, upstream client and HTTP server.

use std::sync::Arc;
use std::time::Duration;

use lsa_axum::{AdapterContext, serve};
use lsa_core::ports::with_ceiling;
use lsa_core::{AdapterConfig, SystemClock, UpstreamPort};
use lsa_upstream::{LlamaStackClient, UpstreamClientConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::CliError;
use crate::parser::Cli;
use crate::shutdown::shutdown_signal;

/// Ceiling for the one-off connectivity check at startup.
pub const STARTUP_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// How long in-flight requests may run after a shutdown signal.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Build the reqwest-backed upstream port.
pub fn build_upstream(config: &AdapterConfig) -> Result<Arc<dyn UpstreamPort>, CliError> {
    let client_config = UpstreamClientConfig::from_adapter(config);
    let client = LlamaStackClient::new(&client_config, Arc::new(SystemClock))?;
    Ok(Arc::new(client))
}

/// Probe the upstream once. Failure is logged, never fatal.
pub async fn check_upstream(
    upstream: &dyn UpstreamPort,
    ceiling: Duration,
    cancel: &CancellationToken,
) -> bool {
    match with_ceiling(ceiling, upstream.health(cancel)).await {
        Ok(()) => {
            info!("LlamaStack connectivity check passed");
            true
        }
        Err(e) => {
            warn!(
                kind = e.kind(),
                "Failed to connect to LlamaStack, continuing anyway: {e}"
            );
            false
        }
    }
}

/// Run the adapter on an already bound listener until `shutdown` fires.
pub async fn serve_on(
    listener: TcpListener,
    config: &AdapterConfig,
    shutdown: CancellationToken,
    grace: Duration,
) -> Result<(), CliError> {
    let upstream = build_upstream(config)?;
    check_upstream(upstream.as_ref(), STARTUP_CHECK_TIMEOUT, &shutdown.child_token()).await;

    let ctx = AdapterContext::new(upstream, Arc::new(SystemClock)).with_auth(config.auth());
    serve(listener, ctx, shutdown, grace).await?;
    Ok(())
}

/// Full process lifecycle for parsed options.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.adapter_config()?;
    info!(
        upstream = %config.upstream_url(),
        listen = %config.listen_addr(),
        auth_enabled = config.auth().is_enforced(),
        upstream_key = config.api_key().is_some(),
        "Starting LlamaStack adapter"
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });

    let listener = TcpListener::bind(config.listen_addr()).await?;
    serve_on(listener, &config, shutdown, SHUTDOWN_GRACE).await
}
