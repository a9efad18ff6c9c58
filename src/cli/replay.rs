//! Usage replay
//!
//! Reads recorded call outcomes and pushes them through `track_usage`, so a
//! session's metrics and recommendations can be inspected offline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use taskroute_core::{MetricsSnapshot, Recommendation, TaskRouter};
use tracing::info;

fn default_success() -> bool {
    true
}

/// One recorded call outcome
#[derive(Debug, Clone, Deserialize)]
pub struct UsageEvent {
    /// Model role the call went to
    pub model: String,
    /// Task text
    #[serde(default)]
    pub task: String,
    /// Tokens consumed
    #[serde(default)]
    pub tokens: u64,
    /// Whether the call succeeded
    #[serde(default = "default_success")]
    pub success: bool,
}

/// Replay output
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// Events applied
    pub events: usize,
    /// Metrics after the replay
    pub metrics: MetricsSnapshot,
    /// Recommendations after the replay
    pub recommendations: Vec<Recommendation>,
}

/// Apply `events` to `router`
pub fn apply(router: &TaskRouter, events: &[UsageEvent]) -> ReplayReport {
    for event in events {
        router.track_usage(&event.model, &event.task, event.tokens, event.success);
    }
    info!(events = events.len(), "Replayed usage events");

    ReplayReport {
        events: events.len(),
        metrics: router.get_metrics(),
        recommendations: router.optimize_selection(),
    }
}

/// Read events from `path` and apply them to `router`
pub fn run(router: &TaskRouter, path: &Path) -> Result<ReplayReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let events: Vec<UsageEvent> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse usage events in {}", path.display()))?;
    Ok(apply(router, &events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use taskroute_core::{ModelProfile, ModelSet, RoutingConfig};

    fn router() -> TaskRouter {
        TaskRouter::new(RoutingConfig::new(ModelSet {
            primary: ModelProfile::new("small", 0.000_001),
            complex: ModelProfile::new("large", 0.000_010),
            planning: ModelProfile::new("large", 0.000_010),
        }))
        .unwrap()
    }

    #[test]
    fn test_replay_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(
            br#"[
                {"model": "primary", "task": "a", "tokens": 1000},
                {"model": "complex", "task": "b", "tokens": 5000, "success": false},
                {"model": "complex", "tokens": 5000}
            ]"#,
        )
        .unwrap();

        let report = run(&router(), file.path()).unwrap();
        assert_eq!(report.events, 3);
        assert_eq!(report.metrics.total_requests, 3);
        assert_eq!(report.metrics.model("complex").unwrap().success_rate.to_string(), "50.00");
        // complex: 50% success and ~99% of cost
        assert_eq!(report.recommendations.len(), 2);
    }

    #[test]
    fn test_replay_rejects_bad_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{}").unwrap();
        assert!(run(&router(), file.path()).is_err());
    }
}
