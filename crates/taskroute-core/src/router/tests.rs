//! Tests for router module

use super::*;
use crate::analyzer::{Classification, TaskContext};
use crate::config::{ModelProfile, ModelRole, ModelSet, RoutingConfig};
use crate::error::Error;
use serde_json::json;

fn test_config() -> RoutingConfig {
    let mut config = RoutingConfig::new(ModelSet {
        primary: ModelProfile::new("sonnet", 0.000_003).with_requests_per_minute(3),
        complex: ModelProfile::new("opus", 0.000_015),
        planning: ModelProfile::new("opus-planner", 0.000_015).with_requests_per_minute(1),
    });
    config.routing_strategy = Some(json!({ "mode": "classification" }));
    config.integration_settings = Some(json!({ "hooks": ["pre-commit"] }));
    config
}

fn router() -> TaskRouter {
    TaskRouter::new(test_config()).unwrap()
}

#[test]
fn test_routing_table() {
    assert_eq!(role_for(Classification::Planning), ModelRole::Planning);
    assert_eq!(role_for(Classification::Complex), ModelRole::Complex);
    assert_eq!(role_for(Classification::Simple), ModelRole::Primary);
}

#[test]
fn test_route_uses_classification() {
    let router = router();
    let ctx = TaskContext::new();

    let planning = router.analyze("Outline a migration strategy", &ctx);
    assert_eq!(router.route(&planning).name, "opus-planner");

    let complex = router.analyze("Handle the dispute workflow", &ctx.clone().with_file_count(8));
    assert_eq!(router.route(&complex).name, "opus");

    let simple = router.analyze("Rename a variable", &ctx);
    assert_eq!(router.route(&simple).name, "sonnet");
}

#[test]
fn test_route_label_always_yields_a_model() {
    let router = router();
    assert_eq!(router.route_label("planning").name, "opus-planner");
    assert_eq!(router.route_label("complex").name, "opus");
    assert_eq!(router.route_label("simple").name, "sonnet");

    for label in ["", "urgent", "PLANNING", "unknown", "primary"] {
        assert_eq!(router.route_label(label).name, "sonnet", "{label}");
    }
}

#[test]
fn test_select_model_records_request() {
    let router = router();
    let selection = router.select_model("Rename a variable", &TaskContext::new());

    assert_eq!(selection.role, ModelRole::Primary);
    assert_eq!(selection.model.name, "sonnet");
    assert!((selection.confidence - 0.85).abs() < f64::EPSILON);
    assert_eq!(selection.reasoning, selection.analysis.reasoning);

    let metrics = router.get_metrics();
    assert_eq!(metrics.total_requests, 1);
    assert_eq!(metrics.model("primary").unwrap().usage, 1);
    assert_eq!(metrics.total_cost, 0.0);
}

#[test]
fn test_get_model_config_falls_back() {
    let router = router();
    assert_eq!(router.get_model_config("complex").name, "opus");
    assert_eq!(router.get_model_config("gpt-4").name, "sonnet");
    assert_eq!(router.get_model_config("").name, "sonnet");
}

#[test]
fn test_availability_against_limit() {
    let router = router();
    assert!(router.check_model_availability("planning"));

    router.track_usage("planning", "task", 10, true);
    assert!(!router.check_model_availability("planning"));

    // unbounded
    for _ in 0..100 {
        router.track_usage("complex", "task", 10, true);
    }
    assert!(router.check_model_availability("complex"));
}

#[test]
fn test_availability_is_advisory() {
    let router = router();
    router.track_usage("planning", "task", 0, true);
    assert!(!router.check_model_availability("planning"));

    let selection = router.select_model("Plan the next release", &TaskContext::new());
    assert_eq!(selection.role, ModelRole::Planning);
    assert_eq!(router.usage().request_count("planning"), 2);
}

#[test]
fn test_track_usage_prices_by_role() {
    let router = router();
    router.track_usage("complex", "task", 2_000, true);
    router.track_usage("not-configured", "task", 2_000, true);

    let metrics = router.get_metrics();
    assert!((metrics.model("complex").unwrap().cost - 0.03).abs() < 1e-9);
    assert_eq!(metrics.model("not-configured").unwrap().cost, 0.0);
    assert_eq!(metrics.total_requests, 2);
}

#[test]
fn test_tracked_cost_never_decreases() {
    let router = router();
    let mut previous = 0.0;
    for (model, tokens) in [
        ("primary", 1_000),
        ("complex", 0),
        ("planning", 5_000),
        ("unknown", 9_000),
        ("complex", 250),
    ] {
        router.track_usage(model, "task", tokens, tokens % 2 == 0);
        let metrics = router.get_metrics();
        assert!(metrics.total_cost.is_finite());
        assert!(metrics.total_cost >= previous, "{model}");
        assert!(metrics.estimated_monthly_cost >= 0.0);
        previous = metrics.total_cost;
    }
}

#[test]
fn test_new_rejects_negative_price() {
    let mut config = test_config();
    config.models.primary.cost_per_unit = -0.005;
    assert!(matches!(
        TaskRouter::new(config),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_custom_projection() {
    let router = router().with_cost_projection(crate::usage::CostProjection::new(4.0).unwrap());
    router.track_usage("primary", "task", 1_000_000, true);

    let metrics = router.get_metrics();
    assert_eq!(metrics.projection_factor, 4.0);
    assert!((metrics.estimated_monthly_cost - 12.0).abs() < 1e-9);
}

#[test]
fn test_optimize_selection() {
    let router = router();
    assert!(router.optimize_selection().is_empty());

    router.track_usage("complex", "task", 1000, false);
    let recommendations = router.optimize_selection();
    assert_eq!(recommendations.len(), 2);
    assert!(recommendations.iter().all(|r| r.model == "complex"));
}

#[test]
fn test_export_config_passes_sections_through() {
    let exported = router().export_config();
    assert_eq!(exported.models.primary.name, "sonnet");
    assert_eq!(exported.routing, Some(json!({ "mode": "classification" })));
    assert_eq!(exported.optimization, None);
    assert_eq!(exported.integration, Some(json!({ "hooks": ["pre-commit"] })));

    let value = serde_json::to_value(&exported).unwrap();
    assert_eq!(value["models"]["planning"]["name"], "opus-planner");
    assert_eq!(value["models"]["primary"]["rateLimits"]["requestsPerMinute"], 3);
}

#[test]
fn test_new_rejects_invalid_config() {
    let mut config = test_config();
    config.models.complex.cost_per_unit = f64::NAN;
    assert!(matches!(
        TaskRouter::new(config),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_router_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TaskRouter>();
}
