//! Metrics Reporting
//!
//! This module turns tracker state into read-only snapshots.

use super::record::UsageState;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Cost Projection
// ============================================================================

/// Periods per month when the accumulated window is one day
pub const DAILY_PERIODS_PER_MONTH: f64 = 30.0;

/// How the monthly cost estimate is extrapolated from accumulated cost
///
/// Accumulated metrics are assumed to cover one day, hence the default of
/// 30 periods per month. Nothing validates that assumption; a router that
/// lives for a week should use something like `30.0 / 7.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostProjection {
    periods_per_month: f64,
}

impl Default for CostProjection {
    fn default() -> Self {
        Self {
            periods_per_month: DAILY_PERIODS_PER_MONTH,
        }
    }
}

impl CostProjection {
    /// Projection with a custom factor
    ///
    /// The factor must be finite and non-negative.
    pub fn new(periods_per_month: f64) -> Result<Self> {
        if !periods_per_month.is_finite() || periods_per_month < 0.0 {
            return Err(Error::InvalidProjection(periods_per_month));
        }
        Ok(Self { periods_per_month })
    }

    /// How many accumulated windows make up a month
    #[must_use]
    pub fn periods_per_month(&self) -> f64 {
        self.periods_per_month
    }

    /// Monthly estimate for `total_cost`
    #[must_use]
    pub fn monthly(&self, total_cost: f64) -> f64 {
        total_cost * self.periods_per_month
    }
}

// ============================================================================
// Percentage
// ============================================================================

/// A percentage that serializes with two decimals, e.g. `"12.50"`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Percentage(pub f64);

impl Percentage {
    /// `part / whole` in percent; zero when `whole` is zero
    #[must_use]
    pub fn of(part: f64, whole: f64) -> Self {
        if whole > 0.0 {
            Self(part / whole * 100.0)
        } else {
            Self(0.0)
        }
    }

    /// Raw value in percent
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Value rounded to the two decimals it is reported with
    #[must_use]
    pub fn rounded(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Per-model figures in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStats {
    /// Requests tracked
    pub usage: u64,
    /// Share of all requests
    pub usage_percentage: Percentage,
    /// Accumulated cost
    pub cost: f64,
    /// Share of total cost
    pub cost_percentage: Percentage,
    /// Successful share of reported outcomes
    pub success_rate: Percentage,
}

/// Point-in-time view of all usage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// When tracking started
    pub tracking_since: DateTime<Utc>,
    /// Requests across all models
    pub total_requests: u64,
    /// Cost across all models
    pub total_cost: f64,
    /// Factor applied to `total_cost` for the monthly estimate
    pub projection_factor: f64,
    /// `total_cost × projection_factor`
    pub estimated_monthly_cost: f64,
    /// Figures per tracked model
    pub model_stats: BTreeMap<String, ModelStats>,
}

impl MetricsSnapshot {
    /// Build a snapshot; percentages are computed against the current totals
    pub(crate) fn from_state(
        state: &UsageState,
        tracking_since: DateTime<Utc>,
        projection: CostProjection,
    ) -> Self {
        let total_cost: f64 = state
            .models
            .values()
            .map(|usage| usage.accumulated_cost)
            .sum();

        let model_stats = state
            .models
            .iter()
            .map(|(model, usage)| {
                let stats = ModelStats {
                    usage: usage.request_count,
                    usage_percentage: Percentage::of(
                        usage.request_count as f64,
                        state.total_requests as f64,
                    ),
                    cost: usage.accumulated_cost,
                    cost_percentage: Percentage::of(usage.accumulated_cost, total_cost),
                    success_rate: Percentage(usage.success_tally.rate()),
                };
                (model.clone(), stats)
            })
            .collect();

        Self {
            tracking_since,
            total_requests: state.total_requests,
            total_cost,
            projection_factor: projection.periods_per_month(),
            estimated_monthly_cost: projection.monthly(total_cost),
            model_stats,
        }
    }

    /// Stats for one model, if it was ever tracked
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&ModelStats> {
        self.model_stats.get(name)
    }
}
