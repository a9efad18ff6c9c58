//! Usage Tracker
//!
//! All counters sit behind one mutex, so concurrent callers never lose an
//! increment and every snapshot is internally consistent.

use super::record::{ModelUsage, UsageState};
use super::report::{CostProjection, MetricsSnapshot};
use crate::config::ModelProfile;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// In-memory usage counters for one router
#[derive(Debug)]
pub struct UsageTracker {
    state: Mutex<UsageState>,
    started_at: DateTime<Utc>,
}

impl Default for UsageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageTracker {
    /// Create an empty tracker
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(UsageState::default()),
            started_at: Utc::now(),
        }
    }

    /// When this tracker was created
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record one request
    ///
    /// `profile` is the validated profile the request is priced against, or
    /// `None` for models without one; those requests are counted but accrue
    /// no cost. Only the router records, so prices always come from a
    /// validated configuration.
    pub(crate) fn record(
        &self,
        model: &str,
        task: &str,
        tokens: u64,
        success: bool,
        profile: Option<&ModelProfile>,
    ) {
        let cost = match profile {
            Some(profile) if tokens > 0 => profile.cost_for(tokens),
            None if tokens > 0 => {
                warn!(model = %model, tokens, "No pricing for model, cost not accrued");
                0.0
            }
            _ => 0.0,
        };

        let mut state = self.state.lock();
        state.total_requests += 1;
        let usage = state.models.entry(model.to_string()).or_default();
        usage.request_count += 1;
        usage.accumulated_cost += cost;
        usage.success_tally.record(success);

        debug!(
            model = %model,
            task_chars = task.chars().count(),
            tokens,
            cost,
            success,
            requests = usage.request_count,
            "Tracked usage"
        );
    }

    /// Requests tracked so far across all models
    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.state.lock().total_requests
    }

    /// Requests tracked so far for `model`
    #[must_use]
    pub fn request_count(&self, model: &str) -> u64 {
        self.state
            .lock()
            .models
            .get(model)
            .map_or(0, |usage| usage.request_count)
    }

    /// Copy of the counters for `model`
    #[must_use]
    pub fn usage(&self, model: &str) -> Option<ModelUsage> {
        self.state.lock().models.get(model).cloned()
    }

    /// Consistent snapshot of all counters
    #[must_use]
    pub fn snapshot(&self, projection: CostProjection) -> MetricsSnapshot {
        let state = self.state.lock();
        MetricsSnapshot::from_state(&state, self.started_at, projection)
    }
}
