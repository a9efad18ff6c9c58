//! Task Analyzer - turns a task description into a routing decision input
//!
//! Analysis is a pure function of the text and context:
//! 1. complexity score (summed rules, clamped to 10)
//! 2. task type (first matching category)
//! 3. domain tags (every matching group)
//! 4. classification (planning, then complex, else simple)
//!
//! # Module Structure
//!
//! - `types`: Context, analysis and enum types
//! - `keywords`: Keyword tables and complex-task patterns
//! - `rules`: Scoring and classification rule tables

pub mod keywords;
pub mod rules;
mod types;


pub use types::{
    Classification, DomainTag, QualityRequirement, TaskAnalysis, TaskContext, TaskType, Urgency,
    UserExperience,
};

use rules::{ScoreRule, Signals, COMPLEXITY_RULES, MAX_COMPLEXITY};
use tracing::debug;

/// Analyze a task description
#[must_use]
pub fn analyze(text: &str, context: &TaskContext) -> TaskAnalysis {
    let lower = text.to_lowercase();

    let complexity_score = rules::complexity_score(&lower, context);
    let task_type = rules::detect_task_type(&lower);
    let domain_tags = rules::detect_domains(&lower);
    let classification = rules::classify(&Signals {
        text: &lower,
        context,
        score: complexity_score,
    });

    let mut reasoning = vec![match classification {
        Classification::Planning => "task involves strategic planning or analysis".to_string(),
        Classification::Complex => format!(
            "complex task (complexity score {complexity_score}/{MAX_COMPLEXITY}) requiring deeper reasoning"
        ),
        Classification::Simple => "standard task with established patterns".to_string(),
    }];
    if classification != Classification::Complex {
        reasoning.push(format!("complexity score {complexity_score}/{MAX_COMPLEXITY}"));
    }
    reasoning.push(format!("task type: {task_type}"));
    if !domain_tags.is_empty() {
        let domains: Vec<&str> = domain_tags.iter().map(|tag| tag.as_str()).collect();
        reasoning.push(format!("domains: {}", domains.join(", ")));
    }
    let flags: Vec<&str> = COMPLEXITY_RULES
        .iter()
        .filter_map(|rule| match rule {
            ScoreRule::Flag { name, .. } if rule.points(&lower, context) > 0 => Some(*name),
            _ => None,
        })
        .collect();
    if !flags.is_empty() {
        reasoning.push(format!("context flags: {}", flags.join(", ")));
    }

    debug!(
        score = complexity_score,
        task_type = %task_type,
        classification = %classification,
        "Analyzed task"
    );

    TaskAnalysis {
        complexity_score,
        task_type,
        domain_tags,
        classification,
        confidence: classification.confidence(),
        reasoning,
    }
}
