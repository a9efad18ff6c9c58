//! Optimization Advisor
//!
//! Recommendations are advisory. Nothing here changes routing.

use super::report::MetricsSnapshot;
use crate::config::ModelRole;
use serde::Serialize;

/// Success rate (percent) below which a model is flagged
pub const MIN_SUCCESS_RATE: f64 = 80.0;

/// Cost share (percent) above which the complex model is flagged
pub const MAX_COMPLEX_COST_SHARE: f64 = 50.0;

/// What a recommendation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Outcome quality
    Performance,
    /// Spend
    Cost,
}

/// A suggested routing adjustment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Kind
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Model the recommendation is about
    pub model: String,
    /// What was observed
    pub issue: String,
    /// What to consider doing
    pub suggestion: String,
}

/// Recommendations for every tracked model in `snapshot`
///
/// Thresholds are compared against the reported two-decimal values, so a
/// flagged figure never prints as if it met the threshold.
#[must_use]
pub fn recommend(snapshot: &MetricsSnapshot) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for (model, stats) in &snapshot.model_stats {
        if stats.success_rate.rounded() < MIN_SUCCESS_RATE {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Performance,
                model: model.clone(),
                issue: format!("low success rate ({}%)", stats.success_rate),
                suggestion: "consider routing more tasks to a higher-accuracy model".to_string(),
            });
        }

        if model == ModelRole::Complex.as_str()
            && stats.cost_percentage.rounded() > MAX_COMPLEX_COST_SHARE
        {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Cost,
                model: model.clone(),
                issue: format!(
                    "high cost contribution ({}% of total)",
                    stats.cost_percentage
                ),
                suggestion: "review whether only genuinely complex tasks are routed here"
                    .to_string(),
            });
        }
    }

    recommendations
}
