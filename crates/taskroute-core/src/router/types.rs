//! Result types for model routing

use crate::analyzer::{Classification, TaskAnalysis};
use crate::config::{ModelProfile, ModelRole, ModelSet};
use serde::Serialize;
use serde_json::Value;

/// Fixed routing table from classification to model role
#[must_use]
pub fn role_for(classification: Classification) -> ModelRole {
    match classification {
        Classification::Planning => ModelRole::Planning,
        Classification::Complex => ModelRole::Complex,
        Classification::Simple => ModelRole::Primary,
    }
}

/// Outcome of [`TaskRouter::select_model`](super::TaskRouter::select_model)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSelection {
    /// Role that was selected
    pub role: ModelRole,
    /// Profile configured for that role
    pub model: ModelProfile,
    /// Why this role was chosen
    pub reasoning: Vec<String>,
    /// Confidence of the underlying classification
    pub confidence: f64,
    /// Full analysis the decision was based on
    pub analysis: TaskAnalysis,
}

/// Configuration handed to downstream consumers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedConfig {
    /// Model profiles
    pub models: ModelSet,
    /// `routingStrategy`, verbatim
    pub routing: Option<Value>,
    /// `costOptimization`, verbatim
    pub optimization: Option<Value>,
    /// `integrationSettings`, verbatim
    pub integration: Option<Value>,
}
