//! Blog commands - manage and audit stored posts

use super::score::write_output;
use crate::blog::{BlogPost, BlogPostPatch, BlogStore, NewBlogPost, StoreError};
use crate::config::{load_project_config, ProjectConfig};
use crate::reporters::{self, OutputFormat, RenderOptions};
use crate::rules::RuleEngine;
use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Subcommand, Debug)]
pub enum BlogCommand {
    /// List posts, newest first
    List {
        /// Include unpublished drafts
        #[arg(long)]
        all: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one post by slug or id
    Get {
        key: String,
    },

    /// Create a post from a JSON file
    Create {
        file: PathBuf,
    },

    /// Apply a JSON patch file to a post
    Update {
        id: u64,
        file: PathBuf,
    },

    /// Delete a post
    Delete {
        id: u64,
    },

    /// Search titles, excerpts and bodies (at least 3 characters)
    Search {
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// Score one stored post
    Score {
        /// Slug or id
        key: String,

        /// Keyword to score against (default: first meta keyword, then first tag)
        #[arg(long, short = 'k')]
        keyword: Option<String>,

        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        #[arg(long)]
        explain_score: bool,
    },

    /// Score every stored post, worst first
    Audit {
        /// Score every post against this keyword
        #[arg(long, short = 'k')]
        keyword: Option<String>,

        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn open_store(config: &ProjectConfig) -> Result<BlogStore> {
    let path = config.blog_db_path();
    BlogStore::open(&path).with_context(|| format!("Failed to open blog store at {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn resolve_format(flag: Option<String>, config: &ProjectConfig) -> Result<OutputFormat> {
    let name = flag
        .or_else(|| config.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());
    OutputFormat::from_str(&name)
}

/// Run a blog subcommand
pub fn run(dir: &Path, command: BlogCommand, no_color: bool) -> Result<()> {
    let config = load_project_config(dir);
    let store = open_store(&config)?;

    match command {
        BlogCommand::List { all, json } => {
            let posts = if all {
                store.list_all()?
            } else {
                store.list_published()?
            };
            print_posts(&posts, json)
        }

        BlogCommand::Get { key } => {
            let post = store
                .find(&key)?
                .ok_or_else(|| StoreError::NotFound(format!("blog post '{key}'")))?;
            println!("{}", serde_json::to_string_pretty(&post)?);
            Ok(())
        }

        BlogCommand::Create { file } => {
            let new_post: NewBlogPost = read_json(&file)?;
            let post = store.create(new_post)?;
            println!(
                "{} Created post {} ({})",
                style("✓").green(),
                style(post.id).bold(),
                style(&post.slug).cyan()
            );
            Ok(())
        }

        BlogCommand::Update { id, file } => {
            let patch: BlogPostPatch = read_json(&file)?;
            let post = store
                .update(id, patch)?
                .ok_or_else(|| StoreError::NotFound(format!("blog post {id}")))?;
            println!(
                "{} Updated post {} ({})",
                style("✓").green(),
                style(post.id).bold(),
                style(&post.slug).cyan()
            );
            Ok(())
        }

        BlogCommand::Delete { id } => {
            if !store.delete(id)? {
                return Err(StoreError::NotFound(format!("blog post {id}")).into());
            }
            println!("{} Deleted post {}", style("✓").green(), id);
            Ok(())
        }

        BlogCommand::Search { query, json } => {
            let posts = store.search(&query)?;
            print_posts(&posts, json)
        }

        BlogCommand::Score {
            key,
            keyword,
            format,
            explain_score,
        } => {
            let format = resolve_format(format, &config)?;
            let engine = RuleEngine::with_default_rules(config.analysis.clone());
            let scored = store.score_post(&engine, &key, keyword.as_deref())?;
            match &scored.keyword {
                Some(k) => eprintln!("Scoring '{}' against keyword '{}'", scored.slug, k),
                None => eprintln!(
                    "Post '{}' has no meta keywords or tags; pass --keyword",
                    scored.slug
                ),
            }
            let opts = RenderOptions {
                explain: explain_score,
                no_color,
            };
            println!("{}", reporters::render(&scored.result, format, opts)?);
            Ok(())
        }

        BlogCommand::Audit {
            keyword,
            format,
            output,
        } => {
            let format = resolve_format(format, &config)?;
            let engine = RuleEngine::with_default_rules(config.analysis.clone());
            let scores = store.audit(&engine, keyword.as_deref())?;
            let opts = RenderOptions {
                explain: false,
                no_color: no_color || output.is_some(),
            };
            let rendered = reporters::render_audit(&scores, format, opts)?;
            write_output(&rendered, output.as_deref())
        }
    }
}

fn print_posts(posts: &[BlogPost], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
        return Ok(());
    }
    if posts.is_empty() {
        println!("No posts.");
        return Ok(());
    }
    for post in posts {
        let status = if post.is_published {
            style("published").green()
        } else {
            style("draft").yellow()
        };
        println!(
            "{:>4}  {}  {}  {}  {}",
            style(post.id).dim(),
            post.date.format("%Y-%m-%d"),
            status,
            style(&post.slug).cyan(),
            post.title
        );
    }
    Ok(())
}
