//! Blog post persistence using redb
//!
//! Three tables:
//! - `posts`: id → JSON-encoded `BlogPost`
//! - `slugs`: slug → id, keeps slugs unique
//! - `meta`: counters (next post id)
//!
//! Every mutation runs in a single write transaction, so the slug index
//! never drifts from the posts table.

use super::{
    audit_posts, BlogPost, BlogPostPatch, NewBlogPost, PostScore, StoreError, StoreResult,
    MIN_SEARCH_CHARS,
};
use crate::rules::RuleEngine;
use chrono::Utc;
use redb::{ReadableTable, TableDefinition};
use std::path::Path;
use tracing::{debug, info};

const POSTS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("posts");
const SLUGS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("slugs");
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const NEXT_ID_KEY: &str = "next_id";

/// Blog post store backed by a single redb file
pub struct BlogStore {
    db: redb::Database,
}

impl BlogStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = redb::Database::create(path)?;

        // Create tables up front so read transactions always find them
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(POSTS_TABLE)?;
            write_txn.open_table(SLUGS_TABLE)?;
            write_txn.open_table(META_TABLE)?;
        }
        write_txn.commit()?;

        debug!("Opened blog store at {}", path.display());
        Ok(Self { db })
    }

    /// Every post, newest first
    pub fn list_all(&self) -> StoreResult<Vec<BlogPost>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(POSTS_TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut posts = Vec::new();
        for item in table.iter()? {
            let (_, value) = item?;
            let post: BlogPost = serde_json::from_slice(value.value())?;
            posts.push(post);
        }
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Published posts, newest first
    pub fn list_published(&self) -> StoreResult<Vec<BlogPost>> {
        let mut posts = self.list_all()?;
        posts.retain(|p| p.is_published);
        Ok(posts)
    }

    pub fn get_by_id(&self, id: u64) -> StoreResult<Option<BlogPost>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS_TABLE)?;
        let post = match table.get(id)? {
            Some(value) => Some(serde_json::from_slice(value.value())?),
            None => None,
        };
        Ok(post)
    }

    pub fn get_by_slug(&self, slug: &str) -> StoreResult<Option<BlogPost>> {
        let id = {
            let read_txn = self.db.begin_read()?;
            let slugs = read_txn.open_table(SLUGS_TABLE)?;
            let id = slugs.get(slug.trim())?.map(|v| v.value());
            id
        };
        match id {
            Some(id) => self.get_by_id(id),
            None => Ok(None),
        }
    }

    /// Insert a new post, assigning the next id
    pub fn create(&self, new_post: NewBlogPost) -> StoreResult<BlogPost> {
        new_post.validate()?;

        let write_txn = self.db.begin_write()?;
        let post = {
            let mut posts = write_txn.open_table(POSTS_TABLE)?;
            let mut slugs = write_txn.open_table(SLUGS_TABLE)?;
            let mut meta = write_txn.open_table(META_TABLE)?;

            let slug = new_post.slug.trim().to_string();
            if slugs.get(slug.as_str())?.is_some() {
                return Err(StoreError::Conflict(format!("slug '{slug}' already exists")));
            }

            let id = meta.get(NEXT_ID_KEY)?.map(|v| v.value()).unwrap_or(1);
            let post = new_post.into_post(id, Utc::now());
            let bytes = serde_json::to_vec(&post)?;

            posts.insert(id, bytes.as_slice())?;
            slugs.insert(post.slug.as_str(), id)?;
            meta.insert(NEXT_ID_KEY, id + 1)?;
            post
        };
        write_txn.commit()?;

        info!("Created post {} ({})", post.id, post.slug);
        Ok(post)
    }

    /// Apply a partial update; `Ok(None)` when the id is unknown
    pub fn update(&self, id: u64, patch: BlogPostPatch) -> StoreResult<Option<BlogPost>> {
        patch.validate()?;

        let write_txn = self.db.begin_write()?;
        let post = {
            let mut posts = write_txn.open_table(POSTS_TABLE)?;
            let mut slugs = write_txn.open_table(SLUGS_TABLE)?;

            let existing = posts.get(id)?.map(|v| v.value().to_vec());
            let Some(bytes) = existing else {
                return Ok(None);
            };
            let mut post: BlogPost = serde_json::from_slice(&bytes)?;
            let old_slug = post.slug.clone();

            patch.apply(&mut post, Utc::now());

            if post.slug != old_slug {
                let owner = slugs.get(post.slug.as_str())?.map(|v| v.value());
                if owner.is_some_and(|other| other != id) {
                    return Err(StoreError::Conflict(format!(
                        "slug '{}' already exists",
                        post.slug
                    )));
                }
                slugs.remove(old_slug.as_str())?;
                slugs.insert(post.slug.as_str(), id)?;
            }

            let bytes = serde_json::to_vec(&post)?;
            posts.insert(id, bytes.as_slice())?;
            post
        };
        write_txn.commit()?;

        info!("Updated post {}", id);
        Ok(Some(post))
    }

    /// Remove a post; returns whether it existed
    pub fn delete(&self, id: u64) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut posts = write_txn.open_table(POSTS_TABLE)?;
            let mut slugs = write_txn.open_table(SLUGS_TABLE)?;

            let existing = posts.remove(id)?.map(|v| v.value().to_vec());
            match existing {
                Some(bytes) => {
                    let post: BlogPost = serde_json::from_slice(&bytes)?;
                    slugs.remove(post.slug.as_str())?;
                    true
                }
                None => false,
            }
        };
        write_txn.commit()?;

        if removed {
            info!("Deleted post {}", id);
        }
        Ok(removed)
    }

    /// Posts (drafts included) whose title, excerpt or content contains `query`
    pub fn search(&self, query: &str) -> StoreResult<Vec<BlogPost>> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_CHARS {
            return Err(StoreError::Validation(format!(
                "search query must be at least {MIN_SEARCH_CHARS} characters"
            )));
        }
        let needle = query.to_lowercase();
        let mut posts = self.list_all()?;
        posts.retain(|p| p.matches(&needle));
        Ok(posts)
    }

    /// Look a post up by numeric id, falling back to slug
    pub fn find(&self, id_or_slug: &str) -> StoreResult<Option<BlogPost>> {
        if let Ok(id) = id_or_slug.trim().parse::<u64>() {
            if let Some(post) = self.get_by_id(id)? {
                return Ok(Some(post));
            }
        }
        self.get_by_slug(id_or_slug)
    }

    /// Score one stored post
    pub fn score_post(
        &self,
        engine: &RuleEngine,
        id_or_slug: &str,
        keyword: Option<&str>,
    ) -> StoreResult<PostScore> {
        let post = self
            .find(id_or_slug)?
            .ok_or_else(|| StoreError::NotFound(format!("blog post '{id_or_slug}'")))?;
        Ok(PostScore::score(engine, &post, keyword))
    }

    /// Score every stored post, lowest score first
    pub fn audit(&self, engine: &RuleEngine, keyword: Option<&str>) -> StoreResult<Vec<PostScore>> {
        let posts = self.list_all()?;
        Ok(audit_posts(engine, &posts, keyword))
    }

    pub fn count(&self) -> StoreResult<u64> {
        use redb::ReadableTableMetadata;
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS_TABLE)?;
        Ok(table.len()?)
    }
}

fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests;
