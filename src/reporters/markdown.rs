//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments on content repos
//! - Editorial notes in a CMS
//! - Documentation

use super::RenderOptions;
use crate::blog::PostScore;
use crate::models::{Finding, ScoreBand, ScoringResult};
use crate::scoring::ScoreBreakdown;
use anyhow::Result;
use chrono::Local;

/// Render scorecard as GitHub-flavored Markdown
pub fn render(result: &ScoringResult, opts: RenderOptions) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(result));
    md.push('\n');

    if result.is_empty() {
        md.push_str("_No target keyword given; nothing was scored._\n");
        return Ok(md);
    }

    md.push_str(&render_summary(result));
    md.push('\n');

    md.push_str(&render_bucket("Problems", "❌", &result.problems));
    md.push_str(&render_bucket("Improvements", "⚠️", &result.improvements));
    md.push_str(&render_bucket("Passed", "✅", &result.passed));

    if opts.explain {
        md.push_str(&render_breakdown(result));
        md.push('\n');
    }

    md.push_str(&render_footer());
    Ok(md)
}

fn band_emoji(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Good => "🟢",
        ScoreBand::NeedsImprovement => "🟠",
        ScoreBand::Poor => "🔴",
    }
}

fn render_header(result: &ScoringResult) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"# {} SEO Content Score

**Score: {}/100** ({})

Generated: {}
"#,
        band_emoji(result.band),
        result.score,
        result.band,
        timestamp
    )
}

fn render_summary(result: &ScoringResult) -> String {
    format!(
        r#"## Summary

| Bucket | Count |
|--------|-------|
| ✅ Passed | {} |
| ⚠️ Improvements | {} |
| ❌ Problems | {} |
"#,
        result.passed.len(),
        result.improvements.len(),
        result.problems.len()
    )
}

fn render_bucket(title: &str, emoji: &str, findings: &[Finding]) -> String {
    if findings.is_empty() {
        return String::new();
    }
    let mut md = format!("## {emoji} {title}\n\n");
    for finding in findings {
        md.push_str(&format!(
            "- **{}**: {}\n",
            escape_md(&finding.label),
            escape_md(&finding.description)
        ));
    }
    md.push('\n');
    md
}

fn render_breakdown(result: &ScoringResult) -> String {
    let b = ScoreBreakdown::from_result(result);
    format!(
        r#"## Score Breakdown

`round(100 × ({} × 3 + {} × 1) / ({} × 3))` = **{}**
"#,
        b.passed,
        b.improvements,
        b.passed + b.improvements + b.problems,
        b.score
    )
}

fn render_footer() -> String {
    format!(
        "---\n\n_Generated by [contentdesk](https://crates.io/crates/contentdesk) v{}_\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Render audit as a Markdown table
pub fn render_audit(scores: &[PostScore]) -> Result<String> {
    let mut md = String::from("# Blog SEO Audit\n\n");
    if scores.is_empty() {
        md.push_str("_No posts in the store._\n");
        return Ok(md);
    }

    md.push_str("| Score | ID | Post | Keyword | Problems |\n");
    md.push_str("|-------|----|------|---------|----------|\n");
    for entry in scores {
        let (score, keyword) = match &entry.keyword {
            Some(k) => (
                format!("{} {}", band_emoji(entry.result.band), entry.result.score),
                escape_md(k),
            ),
            None => ("-".to_string(), "_none_".to_string()),
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            score,
            entry.id,
            escape_md(&entry.title),
            keyword,
            entry.result.problems.len()
        ));
    }
    md.push('\n');
    md.push_str(&render_footer());
    Ok(md)
}

/// Escape table and emphasis characters
fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('*', "\\*").replace('_', "\\_")
}
