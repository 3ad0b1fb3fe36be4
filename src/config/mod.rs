//! Configuration for the table application
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/posttable/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! The record engine itself keeps no settings; everything here configures
//! the shell around it (where to fetch from, page size, export directory,
//! theme and logging).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{LogRotation, LoggingConfig, LoggingSection};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";
const DEFAULT_ENDPOINT: &str = "/posts";
const DEFAULT_PAGE_SIZE: usize = crate::engine::view::DEFAULT_PAGE_SIZE;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Records generated in demo mode
pub const DEMO_RECORD_COUNT: usize = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the record API
    pub api_url: String,

    /// Path fetched once at startup
    pub endpoint: String,

    /// Rows per page (at least 1)
    pub page_size: usize,

    /// HTTP request timeout
    pub request_timeout_secs: u64,

    /// Directory where .xlsx exports are written
    pub export_dir: PathBuf,

    /// Theme name: "dark", "light", "terminal"
    pub theme: String,

    /// Demo mode: serve generated records instead of calling the API
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            export_dir: PathBuf::from("."),
            theme: "dark".to_string(),
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub endpoint: Option<String>,
    pub page_size: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub export_dir: Option<String>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<LoggingSection>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/posttable/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("posttable").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists. A file that fails to parse is an error.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn load() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("POSTTABLE_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Endpoint: env > file > default
        let endpoint = env("POSTTABLE_ENDPOINT")
            .or(file.endpoint)
            .unwrap_or(defaults.endpoint);

        // Page size: env > file > default; zero makes no pages, raise it
        let page_size = env("POSTTABLE_PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .or(file.page_size)
            .unwrap_or(defaults.page_size);
        let page_size = if page_size == 0 {
            eprintln!("Warning: page_size must be at least 1, using 1");
            1
        } else {
            page_size
        };

        // Timeout: file > default
        let request_timeout_secs = file
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs);

        // Export directory: env > file > default
        let export_dir = env("POSTTABLE_EXPORT_DIR")
            .or(file.export_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        // Theme: env > file > default
        let theme = env("POSTTABLE_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // Demo mode: env only (runtime flag)
        let demo_mode = env("POSTTABLE_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let logging = LoggingConfig::resolve(file.logging);

        Self {
            api_url,
            endpoint,
            page_size,
            request_timeout_secs,
            export_dir,
            theme,
            demo_mode,
            logging,
        }
    }
}
