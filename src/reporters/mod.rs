//! Output reporters for scorecards
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown (PR comments, CMS notes)
//!
//! Two kinds of report: a single article scorecard (`score`, `blog score`)
//! and a store-wide audit table (`blog audit`).

mod json;
mod markdown;
mod text;

use crate::blog::PostScore;
use crate::models::ScoringResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Options shared by the scorecard renderers
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Append the points breakdown behind the score
    pub explain: bool,
    /// Plain output without ANSI colors
    pub no_color: bool,
}

/// Render one scorecard
pub fn render(result: &ScoringResult, format: OutputFormat, opts: RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(result, opts),
        OutputFormat::Json => json::render(result),
        OutputFormat::Markdown => markdown::render(result, opts),
    }
}

/// Render an audit over many posts
pub fn render_audit(scores: &[PostScore], format: OutputFormat, opts: RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_audit(scores, opts),
        OutputFormat::Json => json::render_audit(scores),
        OutputFormat::Markdown => markdown::render_audit(scores),
    }
}
