//! Core types for task analysis
//!
//! This module contains the task context supplied by callers and the
//! analysis produced for it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Task Context
// ============================================================================

/// How soon the caller needs the task done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Can wait
    Low,
    /// Default
    Normal,
    /// Needed now
    High,
}

/// Experience level of the person receiving the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserExperience {
    /// New to the codebase or domain
    Beginner,
    /// Familiar with the codebase
    Intermediate,
    /// Maintainer-level familiarity
    Expert,
}

/// Expected output quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityRequirement {
    /// Normal review bar
    Standard,
    /// Elevated review bar
    High,
    /// Production-critical output
    Critical,
}

/// Optional structured facts about a task
///
/// Only `file_count` and the three boolean flags influence scoring. The
/// remaining fields are carried for callers that want them in the
/// analysis output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskContext {
    /// Number of files the task touches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u32>,
    /// Output needs a compliance sign-off
    pub requires_compliance_review: bool,
    /// Change spans more than one service
    pub affects_multiple_services: bool,
    /// Change touches authentication, secrets or PII handling
    pub has_security_implications: bool,
    /// Urgency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    /// Experience of the requester
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_experience: Option<UserExperience>,
    /// Caller is cost constrained
    pub budget_constraint: bool,
    /// Required output quality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_requirement: Option<QualityRequirement>,
}

impl TaskContext {
    /// Empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file count
    #[must_use]
    pub fn with_file_count(mut self, count: u32) -> Self {
        self.file_count = Some(count);
        self
    }

    /// Mark the task as needing compliance review
    #[must_use]
    pub fn with_compliance_review(mut self) -> Self {
        self.requires_compliance_review = true;
        self
    }

    /// Mark the task as spanning several services
    #[must_use]
    pub fn with_multiple_services(mut self) -> Self {
        self.affects_multiple_services = true;
        self
    }

    /// Mark the task as security sensitive
    #[must_use]
    pub fn with_security_implications(mut self) -> Self {
        self.has_security_implications = true;
        self
    }

    /// File count, zero when unknown
    #[must_use]
    pub fn files(&self) -> u32 {
        self.file_count.unwrap_or(0)
    }
}

// ============================================================================
// Task Type
// ============================================================================

/// Kind of work a task describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Writing new code
    CodeGeneration,
    /// Writing tests
    TestCreation,
    /// Writing docs
    Documentation,
    /// Fixing defects
    Debugging,
    /// Restructuring existing code
    Refactoring,
    /// Investigating or reviewing
    Analysis,
    /// Nothing more specific matched
    General,
}

impl TaskType {
    /// Detection order; the first type whose keywords hit wins
    pub const PRIORITY: [TaskType; 6] = [
        Self::CodeGeneration,
        Self::TestCreation,
        Self::Documentation,
        Self::Debugging,
        Self::Refactoring,
        Self::Analysis,
    ];

    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CodeGeneration => "code_generation",
            Self::TestCreation => "test_creation",
            Self::Documentation => "documentation",
            Self::Debugging => "debugging",
            Self::Refactoring => "refactoring",
            Self::Analysis => "analysis",
            Self::General => "general",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Domain Tag
// ============================================================================

/// Business domain a task touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainTag {
    /// Money, credit, lending
    Financial,
    /// Regulation and audit
    Compliance,
    /// Security and sensitive data
    Security,
    /// Speed and scale
    Performance,
}

impl DomainTag {
    /// All tags, in scan order
    pub const ALL: [DomainTag; 4] = [
        Self::Financial,
        Self::Compliance,
        Self::Security,
        Self::Performance,
    ];

    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Compliance => "compliance",
            Self::Security => "security",
            Self::Performance => "performance",
        }
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Coarse routing category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Strategy, design and estimation work
    Planning,
    /// High-complexity or regulated work
    Complex,
    /// Routine work
    Simple,
}

impl Classification {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Complex => "complex",
            Self::Simple => "simple",
        }
    }

    /// Parse a label; `None` for anything outside the three categories
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "planning" => Some(Self::Planning),
            "complex" => Some(Self::Complex),
            "simple" => Some(Self::Simple),
            _ => None,
        }
    }

    /// Fixed confidence reported for this classification
    #[must_use]
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Planning => 0.90,
            Self::Complex => 0.80,
            Self::Simple => 0.85,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Task Analysis
// ============================================================================

/// Result of analyzing one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalysis {
    /// Complexity in `0..=10`
    pub complexity_score: u8,
    /// Detected task type
    pub task_type: TaskType,
    /// Domains the text touches
    pub domain_tags: BTreeSet<DomainTag>,
    /// Routing category
    pub classification: Classification,
    /// Confidence of the classification
    pub confidence: f64,
    /// Human-readable reasons, most important first
    pub reasoning: Vec<String>,
}
