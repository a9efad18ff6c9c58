//! Scoring and classification rules
//!
//! Both the complexity score and the classification are driven by ordered
//! rule tables. Scoring rules are summed; classification rules are tried in
//! order and the first match wins, which is what keeps planning ahead of
//! complexity.

use super::keywords::{self, ARCHITECTURAL, DOMAIN, PLANNING};
use super::types::{Classification, DomainTag, TaskContext, TaskType};
use std::collections::BTreeSet;

/// Upper bound of the complexity score
pub const MAX_COMPLEXITY: u8 = 10;

/// Score at or above which a task is complex
pub const COMPLEX_SCORE_THRESHOLD: u8 = 7;

/// File count above which a task is complex
pub const COMPLEX_FILE_COUNT: u32 = 3;

// ============================================================================
// Complexity Scoring
// ============================================================================

/// One contribution to the complexity score
#[derive(Debug, Clone, Copy)]
pub enum ScoreRule {
    /// Points from the first tier whose threshold the file count exceeds
    FileCount {
        /// `(exclusive threshold, points)`, highest threshold first
        tiers: &'static [(u32, u8)],
    },
    /// Points for every keyword found in the text
    PerKeyword {
        /// Keywords to look for
        keywords: &'static [&'static str],
        /// Points per hit
        points: u8,
    },
    /// Points when a context flag is set
    Flag {
        /// Name used in diagnostics
        name: &'static str,
        /// Points when set
        points: u8,
        /// Reads the flag
        is_set: fn(&TaskContext) -> bool,
    },
}

impl ScoreRule {
    /// Points this rule contributes for the given task
    #[must_use]
    pub fn points(&self, text: &str, context: &TaskContext) -> u32 {
        match self {
            Self::FileCount { tiers } => tiers
                .iter()
                .find(|(threshold, _)| context.files() > *threshold)
                .map_or(0, |(_, points)| u32::from(*points)),
            Self::PerKeyword { keywords, points } => {
                keywords::hits(text, *keywords).count() as u32 * u32::from(*points)
            }
            Self::Flag { points, is_set, .. } => {
                if is_set(context) {
                    u32::from(*points)
                } else {
                    0
                }
            }
        }
    }
}

fn requires_compliance_review(context: &TaskContext) -> bool {
    context.requires_compliance_review
}

fn affects_multiple_services(context: &TaskContext) -> bool {
    context.affects_multiple_services
}

fn has_security_implications(context: &TaskContext) -> bool {
    context.has_security_implications
}

/// Complexity rules, summed in order
pub const COMPLEXITY_RULES: &[ScoreRule] = &[
    ScoreRule::FileCount {
        tiers: &[(5, 3), (2, 1)],
    },
    ScoreRule::PerKeyword {
        keywords: ARCHITECTURAL,
        points: 2,
    },
    ScoreRule::PerKeyword {
        keywords: DOMAIN,
        points: 1,
    },
    ScoreRule::Flag {
        name: "requires_compliance_review",
        points: 3,
        is_set: requires_compliance_review,
    },
    ScoreRule::Flag {
        name: "affects_multiple_services",
        points: 2,
        is_set: affects_multiple_services,
    },
    ScoreRule::Flag {
        name: "has_security_implications",
        points: 2,
        is_set: has_security_implications,
    },
];

/// Sum of all complexity rules, clamped to [`MAX_COMPLEXITY`]
///
/// `text` must already be lower-cased.
#[must_use]
pub fn complexity_score(text: &str, context: &TaskContext) -> u8 {
    let total: u32 = COMPLEXITY_RULES
        .iter()
        .map(|rule| rule.points(text, context))
        .sum();
    // Clamped, so the narrowing cannot truncate
    total.min(u32::from(MAX_COMPLEXITY)) as u8
}

// ============================================================================
// Task Type and Domain Detection
// ============================================================================

/// First task type in [`TaskType::PRIORITY`] with a keyword hit
#[must_use]
pub fn detect_task_type(text: &str) -> TaskType {
    TaskType::PRIORITY
        .into_iter()
        .find(|task_type| {
            keywords::hits(text, keywords::task_type_keywords(*task_type))
                .next()
                .is_some()
        })
        .unwrap_or(TaskType::General)
}

/// Every domain with at least one keyword hit
#[must_use]
pub fn detect_domains(text: &str) -> BTreeSet<DomainTag> {
    DomainTag::ALL
        .into_iter()
        .filter(|tag| {
            keywords::hits(text, keywords::domain_keywords(*tag))
                .next()
                .is_some()
        })
        .collect()
}

// ============================================================================
// Classification
// ============================================================================

/// What classification rules look at
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    /// Lower-cased task text
    pub text: &'a str,
    /// Caller context
    pub context: &'a TaskContext,
    /// Already computed complexity score
    pub score: u8,
}

/// A classification and the predicate that selects it
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Result when the predicate holds
    pub classification: Classification,
    /// Predicate
    pub matches: fn(&Signals<'_>) -> bool,
}

/// Classification rules in precedence order; `simple` when none match
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        classification: Classification::Planning,
        matches: mentions_planning,
    },
    ClassificationRule {
        classification: Classification::Complex,
        matches: is_complex,
    },
];

fn mentions_planning(signals: &Signals<'_>) -> bool {
    keywords::hits(signals.text, PLANNING).next().is_some()
}

fn is_complex(signals: &Signals<'_>) -> bool {
    signals.score >= COMPLEX_SCORE_THRESHOLD
        || has_complex_indicators(signals.text, signals.context)
}

/// Structural complexity check, independent of the score
#[must_use]
pub fn has_complex_indicators(text: &str, context: &TaskContext) -> bool {
    context.files() > COMPLEX_FILE_COUNT
        || context.requires_compliance_review
        || context.has_security_implications
        || keywords::complex_patterns()
            .iter()
            .any(|pattern| pattern.is_match(text))
}

/// Apply [`CLASSIFICATION_RULES`] in order
#[must_use]
pub fn classify(signals: &Signals<'_>) -> Classification {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.matches)(signals))
        .map_or(Classification::Simple, |rule| rule.classification)
}
