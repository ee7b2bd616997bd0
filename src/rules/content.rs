//! Body rules: presence, length, keyword density, structure
//!
//! Word count and density switch to sampled estimates for very large
//! bodies; see `text` for the approximation.

use super::base::{Rule, RuleContext, RuleError, Verdict};
use super::text;

/// Below this many words the article is too thin to rank
pub const MIN_WORDS: usize = 300;
/// At or above this many words the article is considered long enough
pub const GOOD_WORDS: usize = 600;
/// Densities above this percentage read as keyword stuffing
pub const MAX_DENSITY_PERCENT: f64 = 2.5;

pub struct ContentPresenceRule;

impl Rule for ContentPresenceRule {
    fn name(&self) -> &'static str {
        "content-presence"
    }

    fn description(&self) -> &'static str {
        "Article has body content"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if ctx.input.content.is_empty() {
            Ok(Verdict::problem(
                "Missing content",
                "Add body content to the article.",
            ))
        } else {
            Ok(Verdict::passed("Content set", "The article has body content."))
        }
    }
}

pub struct WordCountRule;

impl Rule for WordCountRule {
    fn name(&self) -> &'static str {
        "word-count"
    }

    fn description(&self) -> &'static str {
        "Body is long enough for search engines"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        let words = ctx.word_count();
        let n = words.count;
        let approx = if words.estimated { "about " } else { "" };
        if n < MIN_WORDS {
            Ok(Verdict::problem(
                "Content too short",
                format!(
                    "The article has {approx}{n} words. Write at least {MIN_WORDS} words for a good SEO article."
                ),
            ))
        } else if n < GOOD_WORDS {
            Ok(Verdict::improvement(
                "Content a bit short",
                format!(
                    "The article has {approx}{n} words. {GOOD_WORDS} or more would do better."
                ),
            ))
        } else {
            Ok(Verdict::passed(
                "Good content length",
                format!("The article has {approx}{n} words, long enough for good SEO."),
            ))
        }
    }
}

pub struct KeywordDensityRule;

impl Rule for KeywordDensityRule {
    fn name(&self) -> &'static str {
        "keyword-density"
    }

    fn description(&self) -> &'static str {
        "Keyword appears in the body without stuffing"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        // an empty body simply has no occurrences
        if ctx.input.content.is_empty() {
            return Ok(low_density(ctx));
        }

        let density = text::keyword_density(
            &ctx.input.content,
            &ctx.keyword_lower,
            ctx.word_count(),
            ctx.analysis,
        )?;

        if density.percent > 0.0 && density.percent <= MAX_DENSITY_PERCENT {
            Ok(Verdict::passed(
                "Good keyword density",
                format!(
                    "{}, inside the ideal range (0.5% - {MAX_DENSITY_PERCENT}%).",
                    describe_density(&density)
                ),
            ))
        } else if density.percent > MAX_DENSITY_PERCENT {
            Ok(Verdict::improvement(
                "Keyword density high",
                format!(
                    "{} and may look like spam. Keep it under {MAX_DENSITY_PERCENT}%.",
                    describe_density(&density)
                ),
            ))
        } else {
            Ok(low_density(ctx))
        }
    }
}

fn describe_density(density: &text::Density) -> String {
    let estimate = if density.sampled { "about " } else { "" };
    format!(
        "Keyword density is {:.1}% ({estimate}{:.0} occurrences)",
        density.percent, density.occurrences
    )
}

fn low_density(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::problem(
        "Keyword density low",
        format!(
            "The keyword '{}' rarely appears in the content. Use it more to improve SEO.",
            ctx.keyword
        ),
    )
}

pub struct SubheadingRule;

impl Rule for SubheadingRule {
    fn name(&self) -> &'static str {
        "subheadings"
    }

    fn description(&self) -> &'static str {
        "Body is broken up with H2/H3 subheadings"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if text::has_subheading(&ctx.input.content, ctx.analysis) {
            Ok(Verdict::passed(
                "Uses subheadings",
                "Good! The article uses subheadings (H2, H3) to split up the content.",
            ))
        } else {
            Ok(Verdict::improvement(
                "No subheadings",
                "Use subheadings (H2, H3) to split the content into smaller, easier to read sections.",
            ))
        }
    }
}

pub struct LinkRule;

impl Rule for LinkRule {
    fn name(&self) -> &'static str {
        "links"
    }

    fn description(&self) -> &'static str {
        "Body links to other content"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if text::has_link(&ctx.input.content, ctx.analysis) {
            Ok(Verdict::passed(
                "Uses links",
                "Good! The article links to other content.",
            ))
        } else {
            Ok(Verdict::improvement(
                "No links",
                "Add internal and external links to strengthen SEO.",
            ))
        }
    }
}
