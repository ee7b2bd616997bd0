//! Title rules: presence, keyword, length

use super::base::{Rule, RuleContext, RuleError, Verdict};

/// Titles at or above this many characters get truncated in search results
pub const TITLE_MAX_CHARS: usize = 60;

pub struct TitlePresenceRule;

impl Rule for TitlePresenceRule {
    fn name(&self) -> &'static str {
        "title-presence"
    }

    fn description(&self) -> &'static str {
        "Article has a title"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if ctx.input.title.is_empty() {
            Ok(Verdict::problem(
                "Missing title",
                "Add a title to the article.",
            ))
        } else {
            Ok(Verdict::passed("Title set", "The article has a title."))
        }
    }
}

pub struct TitleKeywordRule;

impl Rule for TitleKeywordRule {
    fn name(&self) -> &'static str {
        "title-keyword"
    }

    fn description(&self) -> &'static str {
        "Title contains the target keyword"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if ctx.contains_keyword(&ctx.input.title) {
            Ok(Verdict::passed(
                "Keyword in title",
                "Good! The title contains the target keyword.",
            ))
        } else {
            Ok(Verdict::problem(
                "Keyword missing from title",
                format!(
                    "Add the keyword '{}' to the title to improve SEO.",
                    ctx.keyword
                ),
            ))
        }
    }
}

pub struct TitleLengthRule;

impl Rule for TitleLengthRule {
    fn name(&self) -> &'static str {
        "title-length"
    }

    fn description(&self) -> &'static str {
        "Title is short enough to display in full on search results"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        let len = ctx.input.title.chars().count();
        if len < TITLE_MAX_CHARS {
            Ok(Verdict::passed(
                "Good title length",
                "The title length fits in a search result.",
            ))
        } else {
            Ok(Verdict::improvement(
                "Title too long",
                format!(
                    "The title has {len} characters. Keep it under {TITLE_MAX_CHARS} so it shows in full on Google."
                ),
            ))
        }
    }
}
