use super::base::{Rule, RuleContext, RuleError, Verdict};

pub struct ImagePresenceRule;

impl Rule for ImagePresenceRule {
    fn name(&self) -> &'static str {
        "image-presence"
    }

    fn description(&self) -> &'static str {
        "Article has a featured image"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
        if ctx.input.has_image {
            Ok(Verdict::passed(
                "Has an image",
                "Good! The article has a featured image.",
            ))
        } else {
            Ok(Verdict::problem(
                "Missing image",
                "Add at least one featured image to the article.",
            ))
        }
    }
}
