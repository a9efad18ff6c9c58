//! Keyword tables for task analysis
//!
//! All matching is substring matching against the lower-cased task text,
//! so every entry here must be lower case. Extending the analyzer with a new
//! keyword is a change to this file only.

use super::types::{DomainTag, TaskType};
use regex::Regex;
use std::sync::OnceLock;

/// Architectural language, +2 complexity per hit
pub const ARCHITECTURAL: &[&str] = &[
    "architecture",
    "refactor",
    "optimize",
    "security",
    "compliance",
    "performance",
    "integration",
    "migration",
];

/// Regulated-domain language, +1 complexity per hit
pub const DOMAIN: &[&str] = &[
    "credit",
    "fcra",
    "facta",
    "compliance",
    "audit",
    "dispute",
    "financial",
    "pii",
    "encryption",
];

/// Any hit classifies the task as planning
pub const PLANNING: &[&str] = &[
    "plan",
    "strategy",
    "roadmap",
    "assessment",
    "analysis",
    "design",
    "architecture",
    "approach",
    "requirements",
    "specification",
    "breakdown",
    "estimate",
];

/// Keywords per task type
#[must_use]
pub fn task_type_keywords(task_type: TaskType) -> &'static [&'static str] {
    match task_type {
        TaskType::CodeGeneration => &[
            "implement",
            "create",
            "build",
            "generate",
            "add feature",
            "write code",
            "scaffold",
        ],
        TaskType::TestCreation => &["test", "coverage", "assert", "mock", "fixture"],
        TaskType::Documentation => &["document", "readme", "docs", "docstring", "changelog"],
        TaskType::Debugging => &["fix", "bug", "debug", "error", "crash", "broken", "issue"],
        TaskType::Refactoring => &[
            "refactor",
            "restructure",
            "clean up",
            "cleanup",
            "reorganize",
            "simplify",
        ],
        TaskType::Analysis => &["analyze", "analyse", "review", "investigate", "evaluate", "audit"],
        TaskType::General => &[],
    }
}

/// Keywords per domain tag
#[must_use]
pub fn domain_keywords(tag: DomainTag) -> &'static [&'static str] {
    match tag {
        DomainTag::Financial => &[
            "credit", "financial", "payment", "loan", "bank", "transaction", "billing",
        ],
        DomainTag::Compliance => &[
            "compliance",
            "fcra",
            "facta",
            "audit",
            "regulation",
            "regulatory",
            "gdpr",
            "dispute",
        ],
        DomainTag::Security => &[
            "security",
            "encryption",
            "pii",
            "auth",
            "vulnerability",
            "secret",
            "permission",
        ],
        DomainTag::Performance => &[
            "performance",
            "optimize",
            "latency",
            "throughput",
            "cache",
            "scale",
            "memory",
        ],
    }
}

/// Phrasings that mark a task as complex regardless of its score:
/// credit decisions, dispute workflows, compliance reviews, security
/// hardening and performance work.
pub fn complex_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"\bcredit\s+(?:score|scoring|decision|decisioning|underwriting|limit)s?\b",
            r"\bdisputes?\s+(?:resolution|workflow|process|handling|investigation)\b",
            r"\b(?:compliance|regulatory)\s+(?:review|check|audit|requirement)s?\b",
            r"\bsecurity\s+(?:audit|review|vulnerabilit(?:y|ies)|hardening|patch)\b",
            r"\bperformance\s+(?:optimi[sz]ation|tuning|bottleneck|regression)s?\b",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("static complex-task pattern"))
        .collect()
    })
}

/// Entries of `keywords` that occur in the already lower-cased `text`
pub fn hits<'a>(
    text: &'a str,
    keywords: &'static [&'static str],
) -> impl Iterator<Item = &'static str> + 'a {
    keywords.iter().copied().filter(move |kw| text.contains(kw))
}
