//! Text (terminal) reporter with colors and formatting

use super::RenderOptions;
use crate::blog::PostScore;
use crate::models::{Finding, ScoreBand, ScoringResult};
use crate::scoring::ScoreBreakdown;
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Terminal palette, or blanks when colors are off
struct Palette {
    reset: &'static str,
    bold: &'static str,
    dim: &'static str,
    green: &'static str,
    amber: &'static str,
    red: &'static str,
}

impl Palette {
    fn new(no_color: bool) -> Self {
        if no_color {
            Self {
                reset: "",
                bold: "",
                dim: "",
                green: "",
                amber: "",
                red: "",
            }
        } else {
            Self {
                reset: RESET,
                bold: BOLD,
                dim: DIM,
                green: GREEN,
                amber: AMBER,
                red: RED,
            }
        }
    }

    fn band(&self, band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Good => self.green,
            ScoreBand::NeedsImprovement => self.amber,
            ScoreBand::Poor => self.red,
        }
    }
}

/// Render scorecard as formatted terminal output
pub fn render(result: &ScoringResult, opts: RenderOptions) -> Result<String> {
    let p = Palette::new(opts.no_color);
    let mut out = String::new();

    out.push_str(&format!("\n{}SEO Content Score{}\n", p.bold, p.reset));
    out.push_str(&format!(
        "{}──────────────────────────────────────{}\n",
        p.dim, p.reset
    ));

    if result.is_empty() {
        out.push_str("No target keyword given. Set a keyword to score the article.\n");
        return Ok(out);
    }

    let band_c = p.band(result.band);
    out.push_str(&format!(
        "Score: {band_c}{}{}/100{}  ({}{}{})\n\n",
        p.bold, result.score, p.reset, band_c, result.band, p.reset
    ));

    push_section(&mut out, &p, "PROBLEMS", p.red, "✗", &result.problems);
    push_section(&mut out, &p, "IMPROVEMENTS", p.amber, "!", &result.improvements);
    push_section(&mut out, &p, "PASSED", p.green, "✓", &result.passed);

    if opts.explain {
        let b = ScoreBreakdown::from_result(result);
        out.push_str(&format!("{}SCORE BREAKDOWN{}\n", p.bold, p.reset));
        out.push_str(&format!(
            "  passed        {:>2} × 3 = {:>2}\n",
            b.passed,
            3 * b.passed
        ));
        out.push_str(&format!(
            "  improvements  {:>2} × 1 = {:>2}\n",
            b.improvements, b.improvements
        ));
        out.push_str(&format!("  problems      {:>2} × 0 =  0\n", b.problems));
        out.push_str(&format!(
            "  {}points {} / {} → {}{}\n\n",
            p.dim, b.points, b.max_points, b.score, p.reset
        ));
    }

    match result.band {
        ScoreBand::Good => out.push_str(&format!("{}Ready to publish.{}\n", p.dim, p.reset)),
        ScoreBand::NeedsImprovement => out.push_str(&format!(
            "{}Fix the problems above to reach a good score.{}\n",
            p.dim, p.reset
        )),
        ScoreBand::Poor => out.push_str(&format!(
            "{}Start with the problems: each one costs more than an improvement.{}\n",
            p.dim, p.reset
        )),
    }

    Ok(out)
}

fn push_section(
    out: &mut String,
    p: &Palette,
    heading: &str,
    color: &str,
    marker: &str,
    findings: &[Finding],
) {
    if findings.is_empty() {
        return;
    }
    out.push_str(&format!("{}{}{} ({})\n", p.bold, heading, p.reset, findings.len()));
    for finding in findings {
        out.push_str(&format!(
            "  {color}{marker}{}  {}{}{}\n      {}{}{}\n",
            p.reset, p.bold, finding.label, p.reset, p.dim, finding.description, p.reset
        ));
    }
    out.push('\n');
}

/// Render audit as a table, worst first
pub fn render_audit(scores: &[PostScore], opts: RenderOptions) -> Result<String> {
    let p = Palette::new(opts.no_color);
    let mut out = String::new();

    out.push_str(&format!("\n{}Blog SEO Audit{} ({} posts)\n", p.bold, p.reset, scores.len()));
    if scores.is_empty() {
        out.push_str("No posts in the store.\n");
        return Ok(out);
    }

    out.push_str(&format!(
        "{}  SCORE  ID    SLUG                            KEYWORD{}\n",
        p.dim, p.reset
    ));
    out.push_str(&format!(
        "{}  ─────────────────────────────────────────────────────────────{}\n",
        p.dim, p.reset
    ));

    for entry in scores {
        let slug = truncate(&entry.slug, 30);
        let (score, keyword) = match &entry.keyword {
            Some(k) => {
                let c = p.band(entry.result.band);
                (format!("{c}{:>5}{}", entry.result.score, p.reset), k.clone())
            }
            None => (
                format!("{}{:>5}{}", p.dim, "-", p.reset),
                format!("{}(no keyword){}", p.dim, p.reset),
            ),
        };
        out.push_str(&format!(
            "  {}  {:<4}  {:<30}  {}\n",
            score, entry.id, slug, keyword
        ));
    }

    let unscored = scores.iter().filter(|s| s.keyword.is_none()).count();
    if unscored > 0 {
        out.push_str(&format!(
            "\n  {}{} post(s) have no meta keywords or tags; pass --keyword to score them{}\n",
            p.dim, unscored, p.reset
        ));
    }
    Ok(out)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}
