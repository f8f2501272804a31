//! URL construction helpers for upstream endpoints.

/// Path of the upstream model listing.
pub const MODELS_PATH: &str = "v1/models";

/// Path of the upstream health probe.
pub const HEALTH_PATH: &str = "health";

/// Join `base` and `path` with exactly one `/`.
///
/// Trailing slashes on the base and leading slashes on the path are
/// collapsed, so `http://h/` and `http://h` yield the same URL.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
