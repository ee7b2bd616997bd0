//! Text measurements shared by the content rules
//!
//! Large bodies are not scanned in full: above
//! `AnalysisConfig::large_content_chars` the word count is estimated from
//! the character count and keyword occurrences are counted on a prefix
//! sample and scaled up. Heading and link detection only ever look at the
//! first `sample_chars` characters, so a document whose only heading sits
//! past the sample is reported as having none.

use crate::config::AnalysisConfig;
use memchr::memmem;
use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::base::RuleError;

static SUBHEADING_PATTERN: OnceLock<Regex> = OnceLock::new();
static LINK_PATTERN: OnceLock<Regex> = OnceLock::new();

fn subheading_pattern() -> &'static Regex {
    SUBHEADING_PATTERN
        .get_or_init(|| Regex::new(r"(?is)<h[23][^>]*>.*?</h[23]>").expect("valid regex"))
}

fn link_pattern() -> &'static Regex {
    LINK_PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)<a[^>]*href=["'][^"']*["'][^>]*>"#).expect("valid regex")
    })
}

/// Word count of a body, flagged when it was estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCount {
    pub count: usize,
    pub estimated: bool,
}

/// Keyword density measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    /// Occurrences per 100 words
    pub percent: f64,
    /// Occurrences found (scaled when sampled)
    pub occurrences: f64,
    pub sampled: bool,
}

/// Longest prefix of `s` with at most `max_chars` characters
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Count whitespace-separated words, or estimate them for very large bodies
pub fn count_words(content: &str, analysis: &AnalysisConfig) -> WordCount {
    let chars = content.chars().count();
    if chars > analysis.large_content_chars {
        let estimate = (chars as f64 / analysis.avg_chars_per_word).round() as usize;
        return WordCount {
            count: estimate,
            estimated: true,
        };
    }
    WordCount {
        count: content.split_whitespace().count(),
        estimated: false,
    }
}

/// Non-overlapping occurrences of `needle_lower` in `haystack`, ignoring case
pub fn count_occurrences(haystack: &str, needle_lower: &str) -> usize {
    if needle_lower.is_empty() {
        return 0;
    }
    let haystack_lower = haystack.to_lowercase();
    memmem::find_iter(haystack_lower.as_bytes(), needle_lower.as_bytes()).count()
}

/// Keyword occurrences per 100 words.
///
/// Full scan below the large-content threshold. Above it, occurrences
/// are counted in the first `sample_chars` characters and scaled by
/// `total_chars / sample_chars`.
pub fn keyword_density(
    content: &str,
    keyword_lower: &str,
    words: WordCount,
    analysis: &AnalysisConfig,
) -> Result<Density, RuleError> {
    if words.count == 0 {
        return Err(RuleError::EmptyCorpus);
    }

    let total_chars = content.chars().count();
    let (occurrences, sampled) = if total_chars > analysis.large_content_chars {
        let sample = char_prefix(content, analysis.sample_chars);
        let sample_chars = sample.chars().count();
        if sample_chars == 0 {
            return Err(RuleError::Malformed("empty density sample".to_string()));
        }
        let found = count_occurrences(sample, keyword_lower) as f64;
        (found * total_chars as f64 / sample_chars as f64, true)
    } else {
        (count_occurrences(content, keyword_lower) as f64, false)
    };

    let percent = occurrences / words.count as f64 * 100.0;
    if !percent.is_finite() {
        return Err(RuleError::Malformed(format!(
            "density is not a number ({occurrences} / {})",
            words.count
        )));
    }

    Ok(Density {
        percent,
        occurrences,
        sampled,
    })
}

/// Markup contains an `<h2>` or `<h3>` element within the scanned prefix
pub fn has_subheading(content: &str, analysis: &AnalysisConfig) -> bool {
    subheading_pattern().is_match(char_prefix(content, analysis.sample_chars))
}

/// Markup contains an anchor with an `href` within the scanned prefix
pub fn has_link(content: &str, analysis: &AnalysisConfig) -> bool {
    link_pattern().is_match(char_prefix(content, analysis.sample_chars))
}

/// Normalize a keyword into slug form: lowercase, diacritics folded,
/// whitespace runs replaced by single hyphens.
///
/// `"Mở quán  Cafe"` → `"mo-quan-cafe"`
pub fn slugify(s: &str) -> String {
    let folded = fold_diacritics(&s.to_lowercase());
    folded.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Strip combining marks after canonical decomposition; `đ` has no
/// decomposition and is mapped by hand.
pub fn fold_diacritics(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .collect()
}
