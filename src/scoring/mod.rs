//! Scorecard scoring
//!
//! # Scoring Formula
//!
//! ```text
//! score = round(100 × (3 × passed + 1 × improvements) / (3 × total))
//! ```
//!
//! Passed rules weigh three times an improvement; problems add nothing to
//! the numerator but still count in the denominator, so every problem
//! pulls the score down in proportion.
//!
//! # Example
//!
//! 10 passed, 2 improvements, 2 problems:
//! (30 + 2) / 42 = 0.762 → 76 ("needs improvement")

use crate::models::{Bucket, ScoreBand, ScoringResult};

/// Compute the 0-100 score from bucket sizes
///
/// Integer arithmetic so the result never depends on float rounding.
/// An empty scorecard scores 0.
pub fn compute_score(passed: usize, improvements: usize, problems: usize) -> u8 {
    let total = passed + improvements + problems;
    if total == 0 {
        return 0;
    }
    let numerator = 100
        * (Bucket::Passed.weight() as usize * passed
            + Bucket::Improvement.weight() as usize * improvements
            + Bucket::Problem.weight() as usize * problems);
    let denominator = Bucket::Passed.weight() as usize * total;
    // round half up: floor((2n + d) / 2d)
    let rounded = (2 * numerator + denominator) / (2 * denominator);
    rounded.min(100) as u8
}

/// Points breakdown for `--explain-score`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub passed: usize,
    pub improvements: usize,
    pub problems: usize,
    /// 3 per passed rule, 1 per improvement
    pub points: usize,
    /// 3 per evaluated rule
    pub max_points: usize,
    pub score: u8,
}

impl ScoreBreakdown {
    pub fn from_result(result: &ScoringResult) -> Self {
        let (passed, improvements, problems) = (
            result.passed.len(),
            result.improvements.len(),
            result.problems.len(),
        );
        Self {
            passed,
            improvements,
            problems,
            points: 3 * passed + improvements,
            max_points: 3 * (passed + improvements + problems),
            score: compute_score(passed, improvements, problems),
        }
    }
}

/// Fill in `score` and `band` on a scorecard whose buckets are complete
pub fn finalize(result: &mut ScoringResult) {
    result.score = compute_score(
        result.passed.len(),
        result.improvements.len(),
        result.problems.len(),
    );
    result.band = ScoreBand::from_score(result.score);
}
