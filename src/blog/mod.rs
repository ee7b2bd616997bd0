//! Blog posts: data model, persistence and SEO audit
//!
//! Posts live in an embedded redb database (see `store`). The scorer can
//! be run over a stored post or, through `audit`, over every post at once.

mod audit;
mod store;

pub use audit::{audit_posts, keyword_for, PostScore};
pub use store::BlogStore;

use crate::models::ArticleInput;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum length of a search query, in characters
pub const MIN_SEARCH_CHARS: usize = 3;

/// Reading speed used to estimate `read_time`
const WORDS_PER_MINUTE: usize = 200;

/// Errors from the blog store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid blog post data: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("failed to encode post: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

macro_rules! impl_from_redb {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for StoreError {
                fn from(e: $err) -> Self {
                    StoreError::Database(e.to_string())
                }
            }
        )*
    };
}

impl_from_redb!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

pub type StoreResult<T> = Result<T, StoreError>;

/// A stored blog post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u64,
    pub title: String,
    pub slug: String,
    /// Short summary, also used as the meta description
    pub excerpt: String,
    /// HTML body
    pub content: String,
    pub date: DateTime<Utc>,
    /// Display string, e.g. "5 min read"
    pub read_time: String,
    pub author: String,
    pub category: String,
    /// Thumbnail / og:image URL
    pub image: String,
    pub is_published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    /// JSON-LD block
    #[serde(default)]
    pub structured_data: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub related_posts: Vec<u64>,
}

impl BlogPost {
    /// Scorer input for this post
    pub fn to_article(&self, keyword: &str) -> ArticleInput {
        ArticleInput {
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            target_keyword: keyword.to_string(),
            has_image: !self.image.trim().is_empty(),
        }
    }

    /// Case-insensitive match on title, excerpt or content
    pub fn matches(&self, query_lower: &str) -> bool {
        [&self.title, &self.excerpt, &self.content]
            .iter()
            .any(|field| field.to_lowercase().contains(query_lower))
    }
}

/// Payload for creating a post
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    /// Defaults to now
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// Estimated from the content when absent
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    #[serde(default)]
    pub structured_data: Option<String>,
    #[serde(default)]
    pub related_posts: Vec<u64>,
}

fn default_published() -> bool {
    true
}

impl NewBlogPost {
    /// Check required fields and slug shape
    pub fn validate(&self) -> StoreResult<()> {
        let required = [
            ("title", &self.title),
            ("slug", &self.slug),
            ("excerpt", &self.excerpt),
            ("content", &self.content),
            ("author", &self.author),
            ("category", &self.category),
            ("image", &self.image),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        validate_slug(&self.slug)
    }

    /// Build the stored record
    pub(crate) fn into_post(self, id: u64, now: DateTime<Utc>) -> BlogPost {
        let read_time = self
            .read_time
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| estimate_read_time(&self.content));
        BlogPost {
            id,
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
            excerpt: self.excerpt,
            content: self.content,
            date: self.date.unwrap_or(now),
            read_time,
            author: self.author,
            category: self.category,
            image: self.image,
            is_published: self.is_published,
            tags: self.tags,
            canonical_url: self.canonical_url,
            meta_title: self.meta_title,
            meta_keywords: self.meta_keywords,
            structured_data: self.structured_data,
            updated_at: now,
            related_posts: self.related_posts,
        }
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub read_time: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub canonical_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keywords: Option<String>,
    pub structured_data: Option<String>,
    pub related_posts: Option<Vec<u64>>,
}

impl BlogPostPatch {
    /// Reject blanking a required field or a malformed slug
    pub fn validate(&self) -> StoreResult<()> {
        let required = [
            ("title", &self.title),
            ("slug", &self.slug),
            ("excerpt", &self.excerpt),
            ("content", &self.content),
            ("author", &self.author),
            ("category", &self.category),
            ("image", &self.image),
        ];
        for (name, value) in required {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(StoreError::Validation(format!("{name} cannot be empty")));
            }
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        Ok(())
    }

    /// Apply to `post`, re-stamping `updated_at`
    pub(crate) fn apply(self, post: &mut BlogPost, now: DateTime<Utc>) {
        if let Some(v) = self.title {
            post.title = v.trim().to_string();
        }
        if let Some(v) = self.slug {
            post.slug = v.trim().to_string();
        }
        if let Some(v) = self.excerpt {
            post.excerpt = v;
        }
        if let Some(v) = self.content {
            post.content = v;
        }
        if let Some(v) = self.date {
            post.date = v;
        }
        if let Some(v) = self.read_time {
            post.read_time = v;
        }
        if let Some(v) = self.author {
            post.author = v;
        }
        if let Some(v) = self.category {
            post.category = v;
        }
        if let Some(v) = self.image {
            post.image = v;
        }
        if let Some(v) = self.is_published {
            post.is_published = v;
        }
        if let Some(v) = self.tags {
            post.tags = v;
        }
        if self.canonical_url.is_some() {
            post.canonical_url = self.canonical_url;
        }
        if self.meta_title.is_some() {
            post.meta_title = self.meta_title;
        }
        if self.meta_keywords.is_some() {
            post.meta_keywords = self.meta_keywords;
        }
        if self.structured_data.is_some() {
            post.structured_data = self.structured_data;
        }
        if let Some(v) = self.related_posts {
            post.related_posts = v;
        }
        post.updated_at = now;
    }
}

/// Path segments under `/api/blog/` that a slug would collide with
const RESERVED_SLUGS: &[&str] = &["search"];

fn validate_slug(slug: &str) -> StoreResult<()> {
    let slug = slug.trim();
    if slug.chars().any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '#') {
        return Err(StoreError::Validation(format!(
            "slug '{slug}' must not contain whitespace, '/', '?' or '#'"
        )));
    }
    // all-digit slugs would be read back as post ids
    if !slug.is_empty() && slug.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::Validation(format!(
            "slug '{slug}' must not be a number"
        )));
    }
    if RESERVED_SLUGS.contains(&slug.to_lowercase().as_str()) {
        return Err(StoreError::Validation(format!("slug '{slug}' is reserved")));
    }
    Ok(())
}

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

/// "N min read" from the visible text of an HTML body, at least one minute
pub fn estimate_read_time(content: &str) -> String {
    let text = tag_pattern().replace_all(content, " ");
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
