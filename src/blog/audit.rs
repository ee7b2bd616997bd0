//! Score stored posts in bulk

use super::BlogPost;
use crate::models::ScoringResult;
use crate::rules::RuleEngine;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Scorecard for one stored post
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostScore {
    pub id: u64,
    pub slug: String,
    pub title: String,
    /// Keyword used, `None` when the post had nothing to score against
    pub keyword: Option<String>,
    pub result: ScoringResult,
}

/// Keyword to score a post against.
///
/// An explicit keyword wins; otherwise the first meta keyword, then the
/// first tag.
pub fn keyword_for(post: &BlogPost, explicit: Option<&str>) -> Option<String> {
    if let Some(k) = explicit.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(k.to_string());
    }
    let from_meta = post
        .meta_keywords
        .as_deref()
        .and_then(|mk| mk.split(',').map(str::trim).find(|k| !k.is_empty()));
    let from_tags = || post.tags.iter().map(|t| t.trim()).find(|t| !t.is_empty());
    from_meta.or_else(from_tags).map(str::to_string)
}

impl PostScore {
    pub fn score(engine: &RuleEngine, post: &BlogPost, explicit: Option<&str>) -> Self {
        let keyword = keyword_for(post, explicit);
        let result = engine.evaluate(&post.to_article(keyword.as_deref().unwrap_or("")));
        Self {
            id: post.id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            keyword,
            result,
        }
    }
}

/// Score every post in parallel, lowest score first
pub fn audit_posts(engine: &RuleEngine, posts: &[BlogPost], explicit: Option<&str>) -> Vec<PostScore> {
    let mut scores: Vec<PostScore> = posts
        .par_iter()
        .map(|post| PostScore::score(engine, post, explicit))
        .collect();
    scores.sort_by(|a, b| a.result.score.cmp(&b.result.score).then_with(|| a.id.cmp(&b.id)));
    debug!("Audited {} posts", scores.len());
    scores
}
