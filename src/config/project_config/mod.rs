//! Project-level configuration support
//!
//! Loads configuration from `contentdesk.toml` or `.contentdeskrc.json`
//! in the working directory, then applies environment overrides.
//!
//! # Configuration Format
//!
//! ```toml
//! # contentdesk.toml
//!
//! [analysis]
//! large_content_chars = 100000
//! sample_chars = 50000
//! avg_chars_per_word = 6.0
//!
//! [store]
//! data_dir = ".contentdesk"
//!
//! [notify]
//! relay_url = "https://script.example.com/exec"
//! admin_email = "owner@example.com"
//! timeout_secs = 30
//! brand = "AutoShop"
//!
//! [server]
//! bind = "127.0.0.1:5000"
//! cors_origins = ["http://localhost:5173"]
//!
//! [defaults]
//! format = "text"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["contentdesk.toml", ".contentdeskrc.json"];

/// Environment variables that override the file
pub const ENV_RELAY_URL: &str = "CONTENTDESK_RELAY_URL";
pub const ENV_ADMIN_EMAIL: &str = "CONTENTDESK_ADMIN_EMAIL";
pub const ENV_DATA_DIR: &str = "CONTENTDESK_DATA_DIR";
pub const ENV_BIND: &str = "CONTENTDESK_BIND";

/// Project-level configuration loaded from contentdesk.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Large-content sampling thresholds for the scorer
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Blog store location
    #[serde(default)]
    pub store: StoreConfig,

    /// E-mail relay endpoint and message branding
    #[serde(default)]
    pub notify: NotifyConfig,

    /// HTTP API settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Sampling thresholds used when content is very large.
///
/// Above `large_content_chars` the word count is estimated from the
/// character count and keyword density is measured on a prefix sample.
/// Heading and link detection always scan at most `sample_chars`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_large_content_chars")]
    pub large_content_chars: usize,

    #[serde(default = "default_sample_chars")]
    pub sample_chars: usize,

    #[serde(default = "default_avg_chars_per_word")]
    pub avg_chars_per_word: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            large_content_chars: default_large_content_chars(),
            sample_chars: default_sample_chars(),
            avg_chars_per_word: default_avg_chars_per_word(),
        }
    }
}

fn default_large_content_chars() -> usize {
    100_000
}
fn default_sample_chars() -> usize {
    50_000
}
fn default_avg_chars_per_word() -> f64 {
    6.0
}

impl AnalysisConfig {
    /// Replace unusable values with defaults
    pub fn normalize(&mut self) {
        if self.sample_chars == 0 {
            warn!("analysis.sample_chars must be positive, using default");
            self.sample_chars = default_sample_chars();
        }
        if !(self.avg_chars_per_word > 0.0) {
            warn!("analysis.avg_chars_per_word must be positive, using default");
            self.avg_chars_per_word = default_avg_chars_per_word();
        }
    }
}

/// Blog store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `blog.redb`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".contentdesk")
}

/// E-mail relay configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Relay script URL; notifications are disabled when unset
    #[serde(default)]
    pub relay_url: Option<String>,

    /// Recipient of admin notifications
    #[serde(default)]
    pub admin_email: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Business name used in auto-reply e-mails
    #[serde(default = "default_brand")]
    pub brand: String,

    #[serde(default)]
    pub hotline: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    /// Credentials handed out on demo requests
    #[serde(default)]
    pub demo: Option<DemoCredentials>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            admin_email: None,
            timeout_secs: default_timeout_secs(),
            brand: default_brand(),
            hotline: None,
            website: None,
            demo: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_brand() -> String {
    "our team".to_string()
}

#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq, Eq)]
pub struct DemoCredentials {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Browser origins allowed by CORS
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Default `--fail-under` threshold for `score`
    #[serde(default)]
    pub fail_under: Option<u8>,
}

/// Load project configuration from `dir`, then apply environment overrides.
///
/// Searches for configuration files in this order:
/// 1. `contentdesk.toml`
/// 2. `.contentdeskrc.json`
///
/// Returns default configuration if no config file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let mut config = load_file_config(dir);
    config.apply_overrides(|key| std::env::var(key).ok());
    config.analysis.normalize();
    config.resolve_paths(dir);
    config
}

fn load_file_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(CONFIG_FILE_NAMES[0]);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(CONFIG_FILE_NAMES[1]);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

impl ProjectConfig {
    /// Apply overrides from a variable lookup (the process environment in
    /// production). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_RELAY_URL) {
            debug!("{} overrides notify.relay_url", ENV_RELAY_URL);
            self.notify.relay_url = Some(url);
        }
        if let Some(email) = get(ENV_ADMIN_EMAIL) {
            self.notify.admin_email = Some(email);
        }
        if let Some(dir) = get(ENV_DATA_DIR) {
            self.store.data_dir = PathBuf::from(dir);
        }
        if let Some(bind) = get(ENV_BIND) {
            self.server.bind = bind;
        }
    }

    /// Make a relative data dir relative to the project directory
    pub fn resolve_paths(&mut self, dir: &Path) {
        if self.store.data_dir.is_relative() {
            self.store.data_dir = dir.join(&self.store.data_dir);
        }
    }

    /// Path of the blog database file
    pub fn blog_db_path(&self) -> PathBuf {
        self.store.data_dir.join("blog.redb")
    }
}
