//! Core data models for contentdesk
//!
//! These models are shared by the scorer, the reporters, the HTTP API
//! and the CLI: the article being scored, the findings each rule emits,
//! and the aggregated scorecard.

use serde::{Deserialize, Serialize};

/// Outcome bucket for a single rule, best to worst
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    #[default]
    Passed,
    Improvement,
    Problem,
}

impl Bucket {
    /// Numerator weight of this bucket in the score formula
    pub fn weight(&self) -> u32 {
        match self {
            Bucket::Passed => 3,
            Bucket::Improvement => 1,
            Bucket::Problem => 0,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Passed => write!(f, "passed"),
            Bucket::Improvement => write!(f, "improvement"),
            Bucket::Problem => write!(f, "problem"),
        }
    }
}

/// The article fields a scoring run looks at
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    /// Body markup (HTML from the editor)
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub target_keyword: String,
    #[serde(default)]
    pub has_image: bool,
}

/// One human-readable diagnostic
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Finding {
    /// Rule that produced this finding (kebab-case)
    #[serde(default)]
    pub rule: String,
    pub label: String,
    pub description: String,
}

impl Finding {
    pub fn new(rule: &str, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Score band shown next to the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    NeedsImprovement,
    #[default]
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => ScoreBand::Good,
            s if s >= 50 => ScoreBand::NeedsImprovement,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::NeedsImprovement => "needs improvement",
            ScoreBand::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Categorized findings plus the 0-100 score
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScoringResult {
    pub passed: Vec<Finding>,
    pub improvements: Vec<Finding>,
    pub problems: Vec<Finding>,
    pub score: u8,
    #[serde(default)]
    pub band: ScoreBand,
}

impl ScoringResult {
    /// Append a finding to the bucket it belongs to
    pub fn push(&mut self, bucket: Bucket, finding: Finding) {
        match bucket {
            Bucket::Passed => self.passed.push(finding),
            Bucket::Improvement => self.improvements.push(finding),
            Bucket::Problem => self.problems.push(finding),
        }
    }

    /// Total number of findings across all buckets
    pub fn total(&self) -> usize {
        self.passed.len() + self.improvements.len() + self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Bucket holding the finding of `rule`, if that rule ran
    pub fn bucket_of(&self, rule: &str) -> Option<Bucket> {
        let has = |list: &[Finding]| list.iter().any(|f| f.rule == rule);
        if has(&self.passed) {
            Some(Bucket::Passed)
        } else if has(&self.improvements) {
            Some(Bucket::Improvement)
        } else if has(&self.problems) {
            Some(Bucket::Problem)
        } else {
            None
        }
    }
}
