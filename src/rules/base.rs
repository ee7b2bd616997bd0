//! Base rule trait and types
//!
//! This module defines the core abstractions for on-page SEO checks:
//! - `Rule` trait that every check implements
//! - `RuleContext` carrying the article and pre-normalized keyword
//! - `Verdict` for the single outcome a rule reports
//! - `RuleError` for local failures the engine recovers from

use crate::config::AnalysisConfig;
use crate::models::{ArticleInput, Bucket};
use std::cell::OnceCell;
use thiserror::Error;

use super::text::{self, WordCount};

/// Errors a rule may raise while inspecting content.
///
/// None of these reach the caller of `evaluate`: the engine turns a
/// failed rule into a single "problem" finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("content has no words to measure against")]
    EmptyCorpus,

    #[error("content could not be scanned: {0}")]
    Malformed(String),
}

/// The one outcome a rule reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub bucket: Bucket,
    pub label: String,
    pub description: String,
}

impl Verdict {
    pub fn passed(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Bucket::Passed, label, description)
    }

    pub fn improvement(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Bucket::Improvement, label, description)
    }

    pub fn problem(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Bucket::Problem, label, description)
    }

    fn new(bucket: Bucket, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            bucket,
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Everything a rule can look at for one evaluation.
///
/// Content statistics are computed on first use and shared by the
/// rules that need them.
pub struct RuleContext<'a> {
    pub input: &'a ArticleInput,
    /// Target keyword, trimmed
    pub keyword: &'a str,
    /// Target keyword, lowercased
    pub keyword_lower: String,
    pub analysis: &'a AnalysisConfig,
    word_count: OnceCell<WordCount>,
}

impl<'a> RuleContext<'a> {
    pub fn new(input: &'a ArticleInput, keyword: &'a str, analysis: &'a AnalysisConfig) -> Self {
        Self {
            input,
            keyword,
            keyword_lower: keyword.to_lowercase(),
            analysis,
            word_count: OnceCell::new(),
        }
    }

    /// Case-insensitive keyword check
    pub fn contains_keyword(&self, haystack: &str) -> bool {
        !self.keyword_lower.is_empty() && haystack.to_lowercase().contains(&self.keyword_lower)
    }

    /// Word count of the body (estimated for very large content)
    pub fn word_count(&self) -> WordCount {
        *self
            .word_count
            .get_or_init(|| text::count_words(&self.input.content, self.analysis))
    }
}

/// Trait for all on-page checks
///
/// A rule must classify every article it sees into exactly one bucket.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct ImagePresenceRule;
///
/// impl Rule for ImagePresenceRule {
///     fn name(&self) -> &'static str {
///         "image-presence"
///     }
///
///     fn description(&self) -> &'static str {
///         "Article has a featured image"
///     }
///
///     fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
///         Ok(Verdict::passed("Featured image set", "..."))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Unique identifier, kebab-case (e.g. "title-length")
    fn name(&self) -> &'static str;

    /// Human-readable description of what this rule checks
    fn description(&self) -> &'static str;

    /// Classify the article
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError>;
}
