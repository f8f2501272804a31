//! Command-line and environment configuration.

use std::ffi::OsStr;

use clap::builder::{BoolishValueParser, StringValueParser, TypedValueParser};
use clap::{Arg, ArgAction, Command, Parser};
use lsa_core::config::{DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT};
use lsa_core::{AdapterConfig, ConfigError};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Value parser that maps a blank value to `default` and hands anything
/// else to `inner`.
///
/// `VAR=` lines in `.env` files and manifests set a variable to the empty
/// string; those must behave like an unset variable.
#[derive(Clone)]
pub struct BlankOr<P: TypedValueParser> {
    inner: P,
    default: P::Value,
}

impl<P: TypedValueParser> BlankOr<P> {
    pub const fn new(inner: P, default: P::Value) -> Self {
        Self { inner, default }
    }
}

impl<P: TypedValueParser> TypedValueParser for BlankOr<P> {
    type Value = P::Value;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        if value.to_str().is_some_and(|v| v.trim().is_empty()) {
            return Ok(self.default.clone());
        }
        self.inner.parse_ref(cmd, arg, value)
    }
}

/// LlamaStack adapter: OpenAI-compatible model listing and health probes
/// in front of a LlamaStack backend.
#[derive(Parser, Debug)]
#[command(name = "llamastack-adapter")]
#[command(version, about)]
pub struct Cli {
    /// Address to listen on
    #[arg(
        long,
        env = "ADAPTER_ADDRESS",
        default_value = DEFAULT_LISTEN_HOST,
        value_parser = BlankOr::new(StringValueParser::new(), DEFAULT_LISTEN_HOST.to_string()),
    )]
    pub address: String,

    /// Port to listen on
    #[arg(
        long,
        env = "ADAPTER_PORT",
        default_value_t = DEFAULT_LISTEN_PORT,
        value_parser = BlankOr::new(clap::value_parser!(u16), DEFAULT_LISTEN_PORT),
    )]
    pub port: u16,

    /// Base URL of the LlamaStack backend
    #[arg(long = "upstream-url", env = "LLAMASTACK_ENDPOINT")]
    pub upstream_url: Option<String>,

    /// API key sent to the backend as a bearer token
    #[arg(long = "upstream-api-key", env = "LLAMASTACK_API_KEY", hide_env_values = true)]
    pub upstream_api_key: Option<String>,

    /// Require `Authorization: Bearer <token>` on /v1/models
    #[arg(
        long = "enable-auth",
        env = "ENABLE_AUTH",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BlankOr::new(BoolishValueParser::new(), true),
    )]
    pub enable_auth: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long = "log-level",
        env = "LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        value_parser = BlankOr::new(StringValueParser::new(), DEFAULT_LOG_LEVEL.to_string()),
    )]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(
        long = "log-json",
        env = "LOG_JSON",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BlankOr::new(BoolishValueParser::new(), false),
    )]
    pub log_json: bool,
}

impl Cli {
    /// Validate the parsed options into an [`AdapterConfig`].
    pub fn adapter_config(&self) -> Result<AdapterConfig, ConfigError> {
        AdapterConfig::builder()
            .optional_upstream_url(self.upstream_url.clone())
            .api_key(self.upstream_api_key.clone())
            .enforce_auth(self.enable_auth)
            .listen_host(self.address.clone())
            .listen_port(self.port)
            .build()
    }
}
