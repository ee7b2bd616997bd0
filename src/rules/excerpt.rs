//! Excerpt (meta description) rules: presence, keyword, length

use super::base::{Rule, RuleContext, RuleError, Verdict};

/// Excerpts at or below this length are too short for a meta description
pub const EXCERPT_MIN_CHARS: usize = 120;
/// Excerpts at or above this length get cut off in search results
pub const EXCERPT_MAX_CHARS: usize = 160;

pub struct ExcerptPresenceRule;

impl Rule for ExcerptPresenceRule {
    fn name(&self) -> &'static str {
        "excerpt-presence"
    }

    fn description(&self) -> &'static str {
        "Article has an excerpt"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if ctx.input.excerpt.is_empty() {
            Ok(Verdict::problem(
                "Missing description",
                "Add an excerpt to the article.",
            ))
        } else {
            Ok(Verdict::passed(
                "Description set",
                "The article has an excerpt.",
            ))
        }
    }
}

pub struct ExcerptKeywordRule;

impl Rule for ExcerptKeywordRule {
    fn name(&self) -> &'static str {
        "excerpt-keyword"
    }

    fn description(&self) -> &'static str {
        "Excerpt contains the target keyword"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if ctx.contains_keyword(&ctx.input.excerpt) {
            Ok(Verdict::passed(
                "Keyword in description",
                "Good! The excerpt contains the target keyword.",
            ))
        } else {
            Ok(Verdict::improvement(
                "Keyword missing from description",
                "Add the keyword to the excerpt to improve SEO.",
            ))
        }
    }
}

pub struct ExcerptLengthRule;

impl Rule for ExcerptLengthRule {
    fn name(&self) -> &'static str {
        "excerpt-length"
    }

    fn description(&self) -> &'static str {
        "Excerpt length suits a meta description"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        let len = ctx.input.excerpt.chars().count();
        if len > EXCERPT_MIN_CHARS && len < EXCERPT_MAX_CHARS {
            Ok(Verdict::passed(
                "Good description length",
                "The excerpt length fits in a search result.",
            ))
        } else if len <= EXCERPT_MIN_CHARS {
            Ok(Verdict::improvement(
                "Description a bit short",
                format!(
                    "The excerpt has {len} characters. Aim for {EXCERPT_MIN_CHARS}-{EXCERPT_MAX_CHARS} to display well on Google."
                ),
            ))
        } else {
            Ok(Verdict::improvement(
                "Description too long",
                format!(
                    "The excerpt has {len} characters. Keep it under {EXCERPT_MAX_CHARS} so it shows in full on Google."
                ),
            ))
        }
    }
}
