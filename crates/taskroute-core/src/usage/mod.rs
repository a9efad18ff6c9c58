//! Usage Tracking - per-model request, cost and outcome counters
//!
//! This module keeps the only mutable state of a router: how many requests
//! each model received, what they cost and how many succeeded. State lives
//! in memory for the lifetime of the tracker and is exposed only through
//! snapshot copies.
//!
//! # Module Structure
//!
//! - `record`: Per-model counters
//! - `tracker`: UsageTracker, the locked owner of all counters
//! - `report`: Metrics snapshots and the monthly cost projection
//! - `advisor`: Optimization recommendations derived from a snapshot

mod advisor;
mod record;
mod report;
mod tracker;


pub use advisor::{
    recommend, Recommendation, RecommendationKind, MAX_COMPLEX_COST_SHARE, MIN_SUCCESS_RATE,
};
pub use record::{ModelUsage, SuccessTally};
pub use report::{CostProjection, MetricsSnapshot, ModelStats, Percentage};
pub use tracker::UsageTracker;
