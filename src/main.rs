//! contentdesk - SEO scoring and blog back-office CLI
//!
//! Scores articles against on-page SEO rules, manages blog posts in an
//! embedded database, and serves the website's HTTP API.

use anyhow::Result;
use clap::Parser;
use contentdesk::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("contentdesk={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
