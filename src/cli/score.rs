//! Score command - run the SEO rules over an article from flags or files

use crate::config::load_project_config;
use crate::models::{ArticleInput, ScoringResult};
use crate::reporters::{self, OutputFormat, RenderOptions};
use crate::rules::RuleEngine;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Args, Debug, Default)]
pub struct ScoreArgs {
    /// Article JSON file (title, slug, excerpt, content, targetKeyword, hasImage)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Target keyword (overrides the input file)
    #[arg(long, short = 'k')]
    pub keyword: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub slug: Option<String>,

    /// Short summary / meta description
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Body markup inline
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the body markup from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// The article has a featured image
    #[arg(long)]
    pub has_image: bool,

    /// Output format: text, json, markdown (or md)
    #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
    pub format: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Exit with code 1 when the score is below this value (CI mode)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_under: Option<u8>,

    /// Show the points behind the score
    #[arg(long)]
    pub explain_score: bool,
}

/// Merge the input file with flag overrides
pub fn build_input(args: &ScoreArgs) -> Result<ArticleInput> {
    let mut input = match &args.input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<ArticleInput>(&raw)
                .with_context(|| format!("Invalid article JSON in {}", path.display()))?
        }
        None => ArticleInput::default(),
    };

    if let Some(v) = &args.keyword {
        input.target_keyword = v.clone();
    }
    if let Some(v) = &args.title {
        input.title = v.clone();
    }
    if let Some(v) = &args.slug {
        input.slug = v.clone();
    }
    if let Some(v) = &args.excerpt {
        input.excerpt = v.clone();
    }
    if let Some(v) = &args.content {
        input.content = v.clone();
    }
    if let Some(path) = &args.content_file {
        input.content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }
    if args.has_image {
        input.has_image = true;
    }
    Ok(input)
}

/// Run the score command
pub fn run(dir: &Path, args: ScoreArgs, no_color: bool) -> Result<()> {
    let config = load_project_config(dir);
    let input = build_input(&args)?;
    if input.target_keyword.trim().is_empty() {
        warn!("No target keyword given; the scorecard will be empty");
    }

    let format_name = args
        .format
        .clone()
        .or_else(|| config.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());
    let format = OutputFormat::from_str(&format_name)?;
    let fail_under = args.fail_under.or(config.defaults.fail_under);

    let engine = RuleEngine::with_default_rules(config.analysis.clone());
    let (result, summary) = engine.evaluate_with_summary(&input);
    if summary.rules_failed > 0 {
        warn!("{} rule(s) could not finish: {}", summary.rules_failed, summary.failed.join(", "));
    }

    let opts = RenderOptions {
        explain: args.explain_score,
        no_color: no_color || args.output.is_some(),
    };
    let rendered = reporters::render(&result, format, opts)?;
    write_output(&rendered, args.output.as_deref())?;

    check_fail_threshold(fail_under, &result);
    Ok(())
}

pub(super) fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Report written to {}", path.display());
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Exit with code 1 when the score is under the threshold
fn check_fail_threshold(fail_under: Option<u8>, result: &ScoringResult) {
    if let Some(threshold) = fail_under {
        if result.score < threshold {
            eprintln!(
                "Failing: score {} is below --fail-under={}",
                result.score, threshold
            );
            std::process::exit(1);
        }
    }
}
