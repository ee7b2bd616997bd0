//! JSON reporter
//!
//! Outputs the scorecard exactly as the HTTP API returns it, so CLI output
//! can be piped to jq or diffed against API responses.

use crate::blog::PostScore;
use crate::models::ScoringResult;
use anyhow::Result;

/// Render scorecard as JSON
pub fn render(result: &ScoringResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render audit as a JSON array
pub fn render_audit(scores: &[PostScore]) -> Result<String> {
    Ok(serde_json::to_string_pretty(scores)?)
}
