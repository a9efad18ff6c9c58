//! Task Router implementation
//!
//! This module contains the TaskRouter struct that analyzes tasks, picks a
//! configured model for them and keeps usage metrics.

use super::types::{role_for, ExportedConfig, ModelSelection};
use crate::analyzer::{self, TaskAnalysis, TaskContext};
use crate::config::{ModelProfile, RoutingConfig};
use crate::error::Result;
use crate::usage::{self, CostProjection, MetricsSnapshot, Recommendation, UsageTracker};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Routes tasks to model profiles and tracks what they cost
///
/// Configuration is immutable after construction. Usage counters are
/// guarded by a single lock, so a router can be shared across threads
/// behind an `Arc`.
#[derive(Debug)]
pub struct TaskRouter {
    config: Arc<RoutingConfig>,
    usage: UsageTracker,
    projection: CostProjection,
}

impl TaskRouter {
    /// Create a router from an already parsed configuration
    pub fn new(config: impl Into<Arc<RoutingConfig>>) -> Result<Self> {
        let config = config.into();
        config.validate()?;
        Ok(Self {
            config,
            usage: UsageTracker::new(),
            projection: CostProjection::default(),
        })
    }

    /// Load the routing document at `path` and create a router from it
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(RoutingConfig::load(path)?)
    }

    /// Use a custom monthly cost projection
    #[must_use]
    pub fn with_cost_projection(mut self, projection: CostProjection) -> Self {
        self.projection = projection;
        self
    }

    /// The configuration this router was built with
    #[must_use]
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// The usage tracker
    #[must_use]
    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    // ========================================================================
    // Analysis and Routing
    // ========================================================================

    /// Analyze a task without selecting or tracking anything
    #[must_use]
    pub fn analyze(&self, text: &str, context: &TaskContext) -> TaskAnalysis {
        analyzer::analyze(text, context)
    }

    /// Profile for an analyzed task
    #[must_use]
    pub fn route(&self, analysis: &TaskAnalysis) -> &ModelProfile {
        self.config.models.get(role_for(analysis.classification))
    }

    /// Profile for a raw classification label; unrecognized labels get
    /// `primary`
    #[must_use]
    pub fn route_label(&self, label: &str) -> &ModelProfile {
        let role_name = analyzer::Classification::from_label(label)
            .map_or(label, |classification| role_for(classification).as_str());
        self.config.models.resolve_or_default(role_name).1
    }

    /// Analyze a task, pick its model and count one request against it
    #[instrument(skip(self, text, context), fields(chars = text.len()))]
    pub fn select_model(&self, text: &str, context: &TaskContext) -> ModelSelection {
        let analysis = self.analyze(text, context);
        let role = role_for(analysis.classification);
        let model = self.config.models.get(role).clone();

        self.usage.record(role.as_str(), text, 0, true, Some(&model));

        info!(
            role = %role,
            model = %model.name,
            classification = %analysis.classification,
            score = analysis.complexity_score,
            "Selected model"
        );

        ModelSelection {
            role,
            model,
            reasoning: analysis.reasoning.clone(),
            confidence: analysis.confidence,
            analysis,
        }
    }

    /// Profile for a role name; unknown names get `primary`
    #[must_use]
    pub fn get_model_config(&self, name: &str) -> &ModelProfile {
        self.config.models.resolve_or_default(name).1
    }

    /// Whether `name` is still under its configured request limit
    ///
    /// Compares every request tracked since construction against
    /// `requestsPerMinute`; there is no sliding window. The answer may be
    /// stale by the time the caller acts on it, and `select_model` does not
    /// consult it.
    #[must_use]
    pub fn check_model_availability(&self, name: &str) -> bool {
        let profile = self.get_model_config(name);
        match profile.rate_limits.requests_per_minute {
            None => true,
            Some(limit) => self.usage.request_count(name) < limit,
        }
    }

    // ========================================================================
    // Usage and Metrics
    // ========================================================================

    /// Report the outcome of a call made to `model`
    ///
    /// Names without a configured profile are counted but accrue no cost.
    pub fn track_usage(&self, model: &str, task: &str, tokens: u64, success: bool) {
        let profile = self.config.models.lookup(model).map(|(_, profile)| profile);
        self.usage.record(model, task, tokens, success, profile);
    }

    /// Snapshot of accumulated usage
    #[must_use]
    pub fn get_metrics(&self) -> MetricsSnapshot {
        self.usage.snapshot(self.projection)
    }

    /// Advisory recommendations based on the current metrics
    #[must_use]
    pub fn optimize_selection(&self) -> Vec<Recommendation> {
        usage::recommend(&self.get_metrics())
    }

    /// Configuration for downstream consumers
    #[must_use]
    pub fn export_config(&self) -> ExportedConfig {
        ExportedConfig {
            models: self.config.models.clone(),
            routing: self.config.routing_strategy.clone(),
            optimization: self.config.cost_optimization.clone(),
            integration: self.config.integration_settings.clone(),
        }
    }
}
