//! Error response matching the OpenAI format.

use serde::{Deserialize, Serialize};

/// Error kind for rejected credentials.
pub const AUTHENTICATION_ERROR: &str = "authentication_error";

/// Error kind for any failure behind the adapter.
pub const INTERNAL_ERROR: &str = "internal_error";

/// Error response matching OpenAI format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

/// Error detail within an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorEnvelope {
    /// Create a new error response.
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                r#type: error_type.into(),
                code: None,
            },
        }
    }

    /// Missing or malformed bearer credentials.
    pub fn authentication_required() -> Self {
        Self::new("Authentication required", AUTHENTICATION_ERROR)
    }

    /// The upstream listing failed. Never carries the upstream cause.
    pub fn upstream_failure() -> Self {
        Self::new(
            "Failed to retrieve models from external service",
            INTERNAL_ERROR,
        )
    }
}
