//! CLI command definitions and handlers

mod blog;
mod init;
mod notify;
mod score;
mod serve;

pub use score::ScoreArgs;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// contentdesk - SEO scoring and blog back-office
#[derive(Parser, Debug)]
#[command(name = "contentdesk")]
#[command(
    version,
    about = "On-page SEO scoring, a blog post store, and contact-form e-mail relay for a business website",
    long_about = "contentdesk scores blog articles against 14 on-page SEO rules \
(title, slug, excerpt, body length, keyword density, structure, image), \
keeps blog posts in an embedded database, and forwards website forms to an \
e-mail relay.\n\n\
Everything runs locally; only form notifications leave the machine.",
    after_help = "\
Examples:
  contentdesk score --keyword cafe --title \"Opening a cafe\" --content-file post.html
  contentdesk score --input article.json --format json --fail-under 80
  contentdesk blog list                         Published posts
  contentdesk blog audit --format markdown      Score every stored post
  contentdesk serve --bind 0.0.0.0:5000         Start the HTTP API
  contentdesk init                              Write an example contentdesk.toml"
)]
pub struct Cli {
    /// Project directory: config file and data dir are resolved from here
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a contentdesk.toml with example settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Score an article against the on-page SEO rules
    #[command(after_help = "\
Examples:
  contentdesk score --keyword \"mở quán cafe\" --title \"Mở quán cafe\" --slug mo-quan-cafe
  contentdesk score --input draft.json --format json
  contentdesk score --input draft.json --content-file body.html --has-image
  contentdesk score --input draft.json --fail-under 80     Exit code 1 below 80 (CI mode)
  contentdesk score --input draft.json --explain-score     Show the points breakdown")]
    Score(ScoreArgs),

    /// Manage stored blog posts
    Blog {
        #[command(subcommand)]
        action: blog::BlogCommand,
    },

    /// Submit a website form through the e-mail relay
    Notify {
        #[command(subcommand)]
        action: notify::NotifyCommand,
    },

    /// Start the HTTP API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show version info
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => init::run(&cli.dir, force),
        Commands::Score(args) => score::run(&cli.dir, args, cli.no_color),
        Commands::Blog { action } => blog::run(&cli.dir, action, cli.no_color),
        Commands::Notify { action } => notify::run(&cli.dir, action),
        Commands::Serve { bind } => serve::run(&cli.dir, bind),
        Commands::Version => {
            println!("contentdesk {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
