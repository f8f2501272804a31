//! tracing-subscriber setup.

use tracing_subscriber::EnvFilter;

const FALLBACK_LEVEL: &str = "info";

/// Pick the filter directive.
///
/// A non-empty `RUST_LOG` wins. Otherwise the configured level is used;
/// unknown levels fall back to `info`.
pub fn filter_directive(rust_log: Option<&str>, level: &str) -> String {
    if let Some(directive) = rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        return directive.to_string();
    }

    match level.trim().to_ascii_lowercase().as_str() {
        level @ ("trace" | "debug" | "info" | "warn" | "error") => level.to_string(),
        "warning" => "warn".to_string(),
        "fatal" | "panic" => "error".to_string(),
        _ => FALLBACK_LEVEL.to_string(),
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(level: &str, json: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::try_new(filter_directive(rust_log.as_deref(), level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
