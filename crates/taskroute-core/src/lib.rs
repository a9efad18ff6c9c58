//! Taskroute Core - task analysis and model routing
//!
//! This crate decides which configured model profile should handle a task:
//! - Config: routing document loading (fail-fast)
//! - Analyzer: complexity scoring, task typing, domain tagging, classification
//! - Router: classification to model role, with a single fallback policy
//! - Usage: in-memory usage counters, metrics snapshots and optimization advice
//!
//! The crate performs no network I/O. Calling the selected model is the
//! caller's job; the outcome is reported back through
//! [`TaskRouter::track_usage`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod router;
pub mod usage;

pub use analyzer::{
    analyze, Classification, DomainTag, QualityRequirement, TaskAnalysis, TaskContext, TaskType,
    Urgency, UserExperience,
};
pub use config::{ConfigFormat, ModelProfile, ModelRole, ModelSet, RateLimits, RoutingConfig};
pub use error::{Error, Result};
pub use router::{ExportedConfig, ModelSelection, TaskRouter};
pub use usage::{
    CostProjection, MetricsSnapshot, ModelStats, ModelUsage, Percentage, Recommendation,
    RecommendationKind, SuccessTally, UsageTracker,
};
