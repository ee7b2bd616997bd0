//! Serve command - run the HTTP API

use crate::config::load_project_config;
use anyhow::{Context, Result};
use std::path::Path;

/// Start the API server and block until shutdown
pub fn run(dir: &Path, bind: Option<String>) -> Result<()> {
    let mut config = load_project_config(dir);
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    eprintln!("Serving on http://{}", config.server.bind);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(crate::server::run(config))
}
