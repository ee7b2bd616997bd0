//! Init command - write an example contentdesk.toml

use crate::config::CONFIG_FILE_NAMES;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub(crate) const EXAMPLE_CONFIG: &str = r#"# contentdesk configuration
# Environment variables override this file:
#   CONTENTDESK_RELAY_URL, CONTENTDESK_ADMIN_EMAIL, CONTENTDESK_DATA_DIR, CONTENTDESK_BIND

[analysis]
# Above this many characters, word count is estimated and density is sampled
large_content_chars = 100000
# Prefix scanned for keyword density, headings and links on large content
sample_chars = 50000
avg_chars_per_word = 6.0

[store]
# Blog database lives at <data_dir>/blog.redb
data_dir = ".contentdesk"

[notify]
# E-mail relay endpoint; form notifications are skipped when unset
# relay_url = "https://script.example.com/exec"
# admin_email = "owner@example.com"
timeout_secs = 30
brand = "our team"
# hotline = "0900 000 000"
# website = "https://example.com"

# [notify.demo]
# url = "demo.example.com"
# username = "demo"
# password = "change-me"

[server]
bind = "127.0.0.1:5000"
cors_origins = ["http://localhost:5173", "http://127.0.0.1:5173"]

[defaults]
# Default output format (text, json, markdown)
format = "text"
# fail_under = 80
"#;

/// Run the init command
pub fn run(dir: &Path, force: bool) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    // Keep the database out of version control
    let gitignore_path = dir.join(".gitignore");
    if gitignore_path.exists() {
        let content = std::fs::read_to_string(&gitignore_path).unwrap_or_default();
        if !content.contains(".contentdesk") {
            let mut file = std::fs::OpenOptions::new()
                .append(true)
                .open(&gitignore_path)?;
            use std::io::Write;
            file.write_all(b"\n# contentdesk\n.contentdesk/\n")?;
            println!(
                "{} Added .contentdesk/ to {}",
                style("✓").green(),
                style(".gitignore").cyan()
            );
        }
    }

    println!("\nNext steps:");
    println!("  {} Set notify.relay_url and admin_email", style("edit contentdesk.toml").cyan());
    println!("  {} Score a draft", style("contentdesk score --input draft.json").cyan());
    println!("  {} Start the API", style("contentdesk serve").cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    #[test]
    fn test_example_config_parses() {
        let config: ProjectConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.analysis.sample_chars, 50_000);
        assert_eq!(config.server.bind, "127.0.0.1:5000");
        assert!(config.notify.relay_url.is_none());
        assert_eq!(config.defaults.format.as_deref(), Some("text"));
    }

    #[test]
    fn test_init_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();

        run(dir.path(), false).unwrap();
        let path = dir.path().join("contentdesk.toml");
        assert!(path.exists());
        let gitignore = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(gitignore.contains(".contentdesk/"));

        std::fs::write(&path, "# edited").unwrap();
        run(dir.path(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited");

        run(dir.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXAMPLE_CONFIG);
    }
}
