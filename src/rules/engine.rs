//! Rule execution engine
//!
//! The RuleEngine runs every registered rule against one article:
//! - Short-circuits to an empty scorecard when there is no keyword
//! - Runs rules in registration order, one finding per rule
//! - Recovers from a failing (or panicking) rule by recording a
//!   "problem" finding for that rule alone
//! - Computes the score once every bucket is filled
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      RuleEngine                         │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Trim keyword (empty → empty scorecard)              │
//! │  2. Build RuleContext (lazy word count)                 │
//! │  3. Evaluate each rule → Verdict or local failure       │
//! │  4. Sort findings into passed / improvements / problems │
//! │  5. Score                                               │
//! └─────────────────────────────────────────────────────────┘
//! ```

use crate::config::AnalysisConfig;
use crate::models::{ArticleInput, Bucket, Finding, ScoringResult};
use crate::scoring;
use std::sync::Arc;
use tracing::{debug, warn};

use super::base::{Rule, RuleContext, Verdict};

/// Label used when a rule could not finish
pub const FAILED_RULE_LABEL: &str = "Content analysis error";

/// Counts from one evaluation, for logging and `--explain-score`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    pub rules_run: usize,
    pub rules_failed: usize,
    /// Rules that failed, by name
    pub failed: Vec<String>,
}

/// Runs the registered rules over an article
pub struct RuleEngine {
    rules: Vec<Arc<dyn Rule>>,
    analysis: AnalysisConfig,
}

impl RuleEngine {
    /// Engine with no rules registered
    pub fn new(analysis: AnalysisConfig) -> Self {
        Self {
            rules: Vec::new(),
            analysis,
        }
    }

    /// Engine with the standard rule set
    pub fn with_default_rules(analysis: AnalysisConfig) -> Self {
        let mut engine = Self::new(analysis);
        for rule in super::default_rules() {
            engine.register(rule);
        }
        engine
    }

    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Score an article
    pub fn evaluate(&self, input: &ArticleInput) -> ScoringResult {
        self.evaluate_with_summary(input).0
    }

    /// Score an article and report which rules failed
    pub fn evaluate_with_summary(&self, input: &ArticleInput) -> (ScoringResult, EvaluationSummary) {
        let mut result = ScoringResult::default();
        let mut summary = EvaluationSummary::default();

        let keyword = input.target_keyword.trim();
        if keyword.is_empty() {
            debug!("No target keyword, skipping evaluation");
            scoring::finalize(&mut result);
            return (result, summary);
        }

        let ctx = RuleContext::new(input, keyword, &self.analysis);

        for rule in &self.rules {
            summary.rules_run += 1;
            let (bucket, finding) = match self.run_single_rule(rule, &ctx) {
                Ok(verdict) => {
                    debug!("Rule {} -> {}", rule.name(), verdict.bucket);
                    (
                        verdict.bucket,
                        Finding::new(rule.name(), verdict.label, verdict.description),
                    )
                }
                Err(reason) => {
                    warn!("Rule {} failed, recording as problem: {}", rule.name(), reason);
                    summary.rules_failed += 1;
                    summary.failed.push(rule.name().to_string());
                    (Bucket::Problem, failed_finding(rule.name()))
                }
            };
            result.push(bucket, finding);
        }

        scoring::finalize(&mut result);
        debug!(
            "Scored {} rules: {} passed, {} improvements, {} problems -> {}",
            summary.rules_run,
            result.passed.len(),
            result.improvements.len(),
            result.problems.len(),
            result.score
        );
        (result, summary)
    }

    /// Run one rule, turning errors and panics into a failure reason
    fn run_single_rule(&self, rule: &Arc<dyn Rule>, ctx: &RuleContext<'_>) -> Result<Verdict, String> {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| rule.evaluate(ctx)));
        match outcome {
            Ok(Ok(verdict)) => Ok(verdict),
            Ok(Err(e)) => Err(e.to_string()),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                Err(format!("Panic: {}", panic_msg))
            }
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_default_rules(AnalysisConfig::default())
    }
}

fn failed_finding(rule: &str) -> Finding {
    Finding::new(
        rule,
        FAILED_RULE_LABEL,
        "The content could not be analyzed. It may be too large or have unsupported formatting.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::base::{RuleError, RuleContext};

    struct AlwaysFails;

    impl Rule for AlwaysFails {
        fn name(&self) -> &'static str {
            "always-fails"
        }
        fn description(&self) -> &'static str {
            "test rule"
        }
        fn evaluate(&self, _ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
            Err(RuleError::Malformed("broken".into()))
        }
    }

    struct Panics;

    impl Rule for Panics {
        fn name(&self) -> &'static str {
            "panics"
        }
        fn description(&self) -> &'static str {
            "test rule"
        }
        fn evaluate(&self, _ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
            panic!("boom")
        }
    }

    struct AlwaysPasses;

    impl Rule for AlwaysPasses {
        fn name(&self) -> &'static str {
            "always-passes"
        }
        fn description(&self) -> &'static str {
            "test rule"
        }
        fn evaluate(&self, _ctx: &RuleContext<'_>) -> Result<Verdict, RuleError> {
            Ok(Verdict::passed("ok", "ok"))
        }
    }

    fn input() -> ArticleInput {
        ArticleInput {
            title: "t".into(),
            target_keyword: "cafe".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_failure_becomes_single_problem() {
        let mut engine = RuleEngine::new(AnalysisConfig::default());
        engine.register(Arc::new(AlwaysPasses));
        engine.register(Arc::new(AlwaysFails));

        let (result, summary) = engine.evaluate_with_summary(&input());
        assert_eq!(result.passed.len(), 1);
        assert_eq!(result.problems.len(), 1);
        assert_eq!(result.problems[0].rule, "always-fails");
        assert_eq!(result.problems[0].label, FAILED_RULE_LABEL);
        assert_eq!(summary.rules_failed, 1);
        assert_eq!(summary.failed, vec!["always-fails"]);
        // (3 + 0) / 6
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_panic_is_contained() {
        let mut engine = RuleEngine::new(AnalysisConfig::default());
        engine.register(Arc::new(Panics));
        engine.register(Arc::new(AlwaysPasses));

        let (result, summary) = engine.evaluate_with_summary(&input());
        assert_eq!(result.total(), 2);
        assert_eq!(result.bucket_of("panics"), Some(Bucket::Problem));
        assert_eq!(summary.rules_run, 2);
    }

    #[test]
    fn test_blank_keyword_short_circuits() {
        let mut engine = RuleEngine::new(AnalysisConfig::default());
        engine.register(Arc::new(AlwaysFails));
        let mut article = input();
        article.target_keyword = "   ".into();

        let (result, summary) = engine.evaluate_with_summary(&article);
        assert!(result.is_empty());
        assert_eq!(result.score, 0);
        assert_eq!(summary.rules_run, 0);
    }

    #[test]
    fn test_default_engine_has_all_rules() {
        assert_eq!(RuleEngine::default().rules().len(), crate::rules::RULE_COUNT);
    }
}
