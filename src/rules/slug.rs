//! Slug rules: presence, keyword

use super::base::{Rule, RuleContext, RuleError, Verdict};
use super::text::{fold_diacritics, slugify};

pub struct SlugPresenceRule;

impl Rule for SlugPresenceRule {
    fn name(&self) -> &'static str {
        "slug-presence"
    }

    fn description(&self) -> &'static str {
        "Article has a URL slug"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if ctx.input.slug.is_empty() {
            Ok(Verdict::problem(
                "Missing URL",
                "Add a slug to give the article a friendly URL.",
            ))
        } else {
            Ok(Verdict::passed("URL set", "The article has a friendly URL."))
        }
    }
}

/// Matches the keyword in slug form, so `mở quán cafe` matches
/// `/blog/mo-quan-cafe`.
pub struct SlugKeywordRule;

impl Rule for SlugKeywordRule {
    fn name(&self) -> &'static str {
        "slug-keyword"
    }

    fn description(&self) -> &'static str {
        "Slug contains the target keyword in slug form"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        let wanted = slugify(ctx.keyword);
        let slug = fold_diacritics(&ctx.input.slug.to_lowercase());
        if !wanted.is_empty() && slug.contains(&wanted) {
            Ok(Verdict::passed(
                "Keyword in URL",
                "Good! The URL contains the target keyword.",
            ))
        } else {
            Ok(Verdict::improvement(
                "Keyword missing from URL",
                format!("Use '{wanted}' in the slug to improve SEO."),
            ))
        }
    }
}
