//! Upstream model records and their OpenAI-compatible translation.
//!
//! `UpstreamModel` mirrors what LlamaStack reports. `PublicModel` is the
//! API-layer shape served from `/v1/models`; the mapping between the two
//! lives here so every adapter translates the same way.

use serde::{Deserialize, Serialize};

/// Owner tag stamped on every translated model.
///
/// This is the upstream system's name, not the per-model `provider` field.
pub const OWNED_BY: &str = "llamastack";

/// Object tag for a single model record.
const MODEL_OBJECT: &str = "model";

/// Object tag for the list wrapper.
const LIST_OBJECT: &str = "list";

/// A model as reported by the upstream `/v1/models` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamModel {
    /// Model identifier (required).
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provider that serves the model inside LlamaStack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Model type (e.g. "llm", "embedding").
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub model_type: Option<String>,
}

impl UpstreamModel {
    /// Create a record carrying only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            provider: None,
            model_type: None,
        }
    }
}

/// Body of the upstream `/v1/models` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamModelList {
    #[serde(default)]
    pub models: Vec<UpstreamModel>,
}

/// Information about a single model (OpenAI format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicModel {
    pub id: String,
    pub object: String,
    /// Unix timestamp assigned at translation time.
    pub created: i64,
    pub owned_by: String,
}

impl PublicModel {
    /// Translate one upstream record, stamping it with `created`.
    pub fn from_upstream(model: UpstreamModel, created: i64) -> Self {
        Self {
            id: model.id,
            object: MODEL_OBJECT.to_string(),
            created,
            owned_by: OWNED_BY.to_string(),
        }
    }
}

/// Translate an upstream listing, one record per input, order preserved.
pub fn translate_models(models: Vec<UpstreamModel>, created: i64) -> Vec<PublicModel> {
    models
        .into_iter()
        .map(|model| PublicModel::from_upstream(model, created))
        .collect()
}

/// Response from /v1/models endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsEnvelope {
    pub object: String,
    pub data: Vec<PublicModel>,
}

impl ModelsEnvelope {
    /// Wrap translated models in the list envelope.
    pub fn new(data: Vec<PublicModel>) -> Self {
        Self {
            object: LIST_OBJECT.to_string(),
            data,
        }
    }
}
