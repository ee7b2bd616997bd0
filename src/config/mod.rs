//! Configuration module for contentdesk
//!
//! This module handles:
//! - Project-level configuration (contentdesk.toml)
//! - Environment overrides
//! - Scorer sampling thresholds
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_project_config, AnalysisConfig, CliDefaults, DemoCredentials, NotifyConfig,
    ProjectConfig, ServerConfig, StoreConfig, CONFIG_FILE_NAMES,
};
