//! Usage Records
//!
//! This module contains the per-model counters kept by the tracker.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome counts for one model
///
/// `success <= total` always holds because both are only ever bumped
/// together in [`SuccessTally::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessTally {
    /// Requests reported
    pub total: u64,
    /// Requests reported as successful
    pub success: u64,
}

impl SuccessTally {
    /// Count one outcome
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.success += 1;
        }
    }

    /// Success rate in percent; zero before any outcome is recorded
    #[must_use]
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.success as f64 / self.total as f64 * 100.0
        }
    }
}

/// Counters for one model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUsage {
    /// Requests tracked for this model
    pub request_count: u64,
    /// Sum of `tokens × costPerUnit` over all tracked requests
    pub accumulated_cost: f64,
    /// Outcomes
    pub success_tally: SuccessTally,
}

/// Everything the tracker guards
#[derive(Debug, Default)]
pub(crate) struct UsageState {
    pub(crate) total_requests: u64,
    pub(crate) models: BTreeMap<String, ModelUsage>,
}
