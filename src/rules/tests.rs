use super::*;
use crate::models::{Bucket, ScoreBand};

fn words(filler: usize, keyword: &str, hits: usize) -> String {
    let mut out: Vec<String> = (0..filler).map(|i| format!("word{i}")).collect();
    // spread the keyword through the body
    for h in 0..hits {
        let at = (h * out.len()) / hits.max(1);
        out.insert(at.min(out.len()), keyword.to_string());
    }
    out.join(" ")
}

fn full_article() -> ArticleInput {
    ArticleInput {
        title: "How to open a cafe in Hanoi".into(),
        slug: "how-to-open-a-cafe".into(),
        excerpt: "A practical guide to opening a cafe: licences, premises, staffing and the first \
                  three months of trading, from people who have done it."
            .into(),
        content: format!(
            "<h2>Licences</h2><p>{}</p><p>See <a href=\"/pricing\">our packages</a>.</p>",
            words(690, "cafe", 10)
        ),
        target_keyword: "cafe".into(),
        has_image: true,
    }
}

#[test]
fn test_every_rule_reports_once() {
    let result = evaluate(&full_article());
    assert_eq!(result.total(), RULE_COUNT);
    for rule in default_rules() {
        assert!(
            result.bucket_of(rule.name()).is_some(),
            "rule {} produced no finding",
            rule.name()
        );
    }
}

#[test]
fn test_well_written_article_scores_full() {
    let excerpt_len = full_article().excerpt.chars().count();
    assert!(excerpt_len > EXCERPT_MIN_CHARS && excerpt_len < EXCERPT_MAX_CHARS);

    let result = evaluate(&full_article());
    assert!(result.problems.is_empty(), "{:?}", result.problems);
    assert!(result.improvements.is_empty(), "{:?}", result.improvements);
    assert_eq!(result.score, 100);
    assert_eq!(result.band, ScoreBand::Good);
}

#[test]
fn test_empty_keyword_gives_empty_scorecard() {
    let mut article = full_article();
    article.target_keyword = String::new();

    let result = evaluate(&article);
    assert_eq!(result.score, 0);
    assert!(result.passed.is_empty());
    assert!(result.improvements.is_empty());
    assert!(result.problems.is_empty());
}

#[test]
fn test_evaluation_is_deterministic() {
    let article = full_article();
    let a = evaluate(&article);
    let b = evaluate(&article);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_vietnamese_title_and_slug() {
    let article = ArticleInput {
        title: "Mở quán cafe".into(),
        slug: "mo-quan-cafe".into(),
        excerpt: String::new(),
        content: String::new(),
        target_keyword: "mở quán cafe".into(),
        has_image: false,
    };

    let result = evaluate(&article);
    for rule in ["title-presence", "title-keyword", "title-length", "slug-presence", "slug-keyword"] {
        assert_eq!(result.bucket_of(rule), Some(Bucket::Passed), "{rule}");
    }
    for rule in ["excerpt-presence", "content-presence", "image-presence"] {
        assert_eq!(result.bucket_of(rule), Some(Bucket::Problem), "{rule}");
    }
    assert_eq!(result.total(), RULE_COUNT);
    assert!(result.problems.len() >= 2);
    // 5 passed, 4 improvements, 5 problems: (15 + 4) / 42
    assert_eq!(result.score, 45);
}

#[test]
fn test_medium_article_without_structure() {
    let article = ArticleInput {
        title: "Cafe".into(),
        slug: "cafe".into(),
        excerpt: "cafe".into(),
        content: words(597, "cafe", 3),
        target_keyword: "cafe".into(),
        has_image: true,
    };
    assert_eq!(article.content.split_whitespace().count(), 600);

    let result = evaluate(&article);
    assert_eq!(result.bucket_of("word-count"), Some(Bucket::Passed));
    assert_eq!(result.bucket_of("keyword-density"), Some(Bucket::Passed));
    assert_eq!(result.bucket_of("subheadings"), Some(Bucket::Improvement));
    assert_eq!(result.bucket_of("links"), Some(Bucket::Improvement));

    let density = result
        .passed
        .iter()
        .find(|f| f.rule == "keyword-density")
        .unwrap();
    assert!(density.description.contains("0.5%"), "{}", density.description);
    assert!(density.description.contains("(3 occurrences)"), "{}", density.description);
}

#[test]
fn test_long_title() {
    let title = format!("Cafe {}", "x".repeat(70));
    assert_eq!(title.chars().count(), 75);
    let article = ArticleInput {
        title,
        target_keyword: "cafe".into(),
        ..Default::default()
    };

    let result = evaluate(&article);
    assert_eq!(result.bucket_of("title-presence"), Some(Bucket::Passed));
    assert_eq!(result.bucket_of("title-keyword"), Some(Bucket::Passed));
    assert_eq!(result.bucket_of("title-length"), Some(Bucket::Improvement));
}

#[test]
fn test_empty_title_is_problem_for_keyword_rule() {
    let article = ArticleInput {
        target_keyword: "cafe".into(),
        ..Default::default()
    };
    let result = evaluate(&article);
    assert_eq!(result.bucket_of("title-presence"), Some(Bucket::Problem));
    assert_eq!(result.bucket_of("title-keyword"), Some(Bucket::Problem));
    assert_eq!(result.bucket_of("title-length"), Some(Bucket::Passed));
}

#[test]
fn test_more_words_never_lowers_score() {
    // 2% density in both
    let mut short = full_article();
    short.content = words(245, "cafe", 5);
    let mut long = full_article();
    long.content = words(637, "cafe", 13);
    assert_eq!(short.content.split_whitespace().count(), 250);
    assert_eq!(long.content.split_whitespace().count(), 650);

    let before = evaluate(&short);
    let after = evaluate(&long);

    assert_eq!(before.bucket_of("word-count"), Some(Bucket::Problem));
    assert_eq!(after.bucket_of("word-count"), Some(Bucket::Passed));
    assert_eq!(before.bucket_of("keyword-density"), Some(Bucket::Passed));
    assert_eq!(after.bucket_of("keyword-density"), Some(Bucket::Passed));
    assert!(after.score >= before.score);
}

#[test]
fn test_excerpt_length_boundaries() {
    let mut article = full_article();
    for (len, bucket) in [
        (120, Bucket::Improvement),
        (121, Bucket::Passed),
        (159, Bucket::Passed),
        (160, Bucket::Improvement),
    ] {
        article.excerpt = format!("cafe{}", "e".repeat(len - 4));
        let result = evaluate(&article);
        assert_eq!(result.bucket_of("excerpt-length"), Some(bucket), "len {len}");
    }
}

#[test]
fn test_word_count_boundaries() {
    let mut article = full_article();
    for (n, bucket) in [
        (299, Bucket::Problem),
        (300, Bucket::Improvement),
        (599, Bucket::Improvement),
        (600, Bucket::Passed),
    ] {
        article.content = words(n - 1, "cafe", 1);
        let result = evaluate(&article);
        assert_eq!(result.bucket_of("word-count"), Some(bucket), "{n} words");
    }
}

#[test]
fn test_keyword_stuffing_is_improvement() {
    let mut article = full_article();
    article.content = words(90, "cafe", 10);
    let result = evaluate(&article);
    assert_eq!(result.bucket_of("keyword-density"), Some(Bucket::Improvement));
}

#[test]
fn test_absent_keyword_density_is_problem() {
    let mut article = full_article();
    article.content = words(700, "tea", 5);
    let result = evaluate(&article);
    assert_eq!(result.bucket_of("keyword-density"), Some(Bucket::Problem));
}

#[test]
fn test_blank_body_fails_density_locally() {
    let mut article = full_article();
    article.content = "   \n  ".into();

    let result = evaluate(&article);
    assert_eq!(result.total(), RULE_COUNT);
    assert_eq!(result.bucket_of("content-presence"), Some(Bucket::Passed));
    let density = result
        .problems
        .iter()
        .find(|f| f.rule == "keyword-density")
        .expect("density recorded as problem");
    assert_eq!(density.label, FAILED_RULE_LABEL);
}

#[test]
fn test_large_content_is_sampled() {
    let analysis = AnalysisConfig {
        large_content_chars: 1_000,
        sample_chars: 500,
        avg_chars_per_word: 6.0,
    };
    let mut article = full_article();
    // heading only past the sampled prefix
    article.content = format!("{} <h2>Late</h2>", words(400, "cafe", 4));
    assert!(article.content.chars().count() > 1_000);

    let result = evaluate_with(&article, &analysis);
    assert_eq!(result.total(), RULE_COUNT);
    assert_eq!(result.bucket_of("subheadings"), Some(Bucket::Improvement));
    let wc = result
        .passed
        .iter()
        .chain(&result.improvements)
        .chain(&result.problems)
        .find(|f| f.rule == "word-count")
        .unwrap();
    assert!(wc.description.contains("about"), "{}", wc.description);

    // the first keyword sits inside the sample, so density is non-zero and estimated
    let density = result
        .passed
        .iter()
        .chain(&result.improvements)
        .find(|f| f.rule == "keyword-density")
        .unwrap();
    assert!(density.description.contains("about"), "{}", density.description);
}

#[test]
fn test_slug_keyword_with_diacritics_in_slug() {
    let article = ArticleInput {
        slug: "bi-quyet-mo-quan-tra-sua".into(),
        target_keyword: "Trà Sữa".into(),
        ..Default::default()
    };
    let result = evaluate(&article);
    assert_eq!(result.bucket_of("slug-keyword"), Some(Bucket::Passed));

    let miss = ArticleInput {
        slug: "bi-quyet-kinh-doanh".into(),
        target_keyword: "trà sữa".into(),
        ..Default::default()
    };
    assert_eq!(
        evaluate(&miss).bucket_of("slug-keyword"),
        Some(Bucket::Improvement)
    );
}
