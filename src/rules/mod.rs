//! On-page SEO rules
//!
//! This module contains the content quality checks run over a blog
//! article. Every rule classifies the article into exactly one bucket
//! (passed / improvement / problem), so a full evaluation always yields
//! `RULE_COUNT` findings.
//!
//! # Rule Categories
//!
//! - **Title**: presence, keyword, length
//! - **Slug**: presence, keyword
//! - **Excerpt**: presence, keyword, length
//! - **Content**: presence, word count, keyword density, subheadings, links
//! - **Media**: featured image
//!
//! # Example
//!
//! ```ignore
//! use contentdesk::models::ArticleInput;
//! use contentdesk::rules::evaluate;
//!
//! let result = evaluate(&ArticleInput {
//!     title: "Opening a cafe".into(),
//!     target_keyword: "cafe".into(),
//!     ..Default::default()
//! });
//! println!("{} / 100", result.score);
//! ```

mod base;
mod content;
mod engine;
mod excerpt;
mod image;
mod slug;
pub mod text;
mod title;

pub use base::{Rule, RuleContext, RuleError, Verdict};
pub use content::{
    ContentPresenceRule, KeywordDensityRule, LinkRule, SubheadingRule, WordCountRule,
    GOOD_WORDS, MAX_DENSITY_PERCENT, MIN_WORDS,
};
pub use engine::{EvaluationSummary, RuleEngine, FAILED_RULE_LABEL};
pub use excerpt::{
    ExcerptKeywordRule, ExcerptLengthRule, ExcerptPresenceRule, EXCERPT_MAX_CHARS,
    EXCERPT_MIN_CHARS,
};
pub use image::ImagePresenceRule;
pub use slug::{SlugKeywordRule, SlugPresenceRule};
pub use title::{TitleKeywordRule, TitleLengthRule, TitlePresenceRule, TITLE_MAX_CHARS};

use crate::config::AnalysisConfig;
use crate::models::{ArticleInput, ScoringResult};
use std::sync::Arc;

/// Number of rules in the standard set
pub const RULE_COUNT: usize = 14;

/// The standard rule set, in report order
pub fn default_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(TitlePresenceRule),
        Arc::new(TitleKeywordRule),
        Arc::new(TitleLengthRule),
        Arc::new(SlugPresenceRule),
        Arc::new(SlugKeywordRule),
        Arc::new(ExcerptPresenceRule),
        Arc::new(ExcerptKeywordRule),
        Arc::new(ExcerptLengthRule),
        Arc::new(ContentPresenceRule),
        Arc::new(WordCountRule),
        Arc::new(KeywordDensityRule),
        Arc::new(SubheadingRule),
        Arc::new(LinkRule),
        Arc::new(ImagePresenceRule),
    ]
}

/// Score an article with the standard rules and default sampling
pub fn evaluate(input: &ArticleInput) -> ScoringResult {
    RuleEngine::default().evaluate(input)
}

/// Score an article with the standard rules and custom sampling
pub fn evaluate_with(input: &ArticleInput, analysis: &AnalysisConfig) -> ScoringResult {
    RuleEngine::with_default_rules(analysis.clone()).evaluate(input)
}

#[cfg(test)]
mod tests;
