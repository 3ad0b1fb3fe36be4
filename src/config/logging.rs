//! `[logging]` section: filter level and the optional JSON log file

use serde::Deserialize;
use std::path::PathBuf;

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    const ALL: [Self; 3] = [Self::Hourly, Self::Daily, Self::Never];

    /// Case-insensitive; anything unrecognised becomes `Daily`
    pub fn parse(value: &str) -> Self {
        match Self::ALL
            .into_iter()
            .find(|rotation| rotation.as_str().eq_ignore_ascii_case(value.trim()))
        {
            Some(rotation) => rotation,
            None => {
                // Tracing is not up yet while config loads
                eprintln!(
                    "Warning: unknown file_rotation {:?}, using {}",
                    value,
                    Self::default().as_str()
                );
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Resolved logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` level for the posttable target; RUST_LOG wins over it
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, the appender adds the date suffix
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file_enabled: false,
            file_dir: "./logs".into(),
            file_rotation: LogRotation::default(),
            file_prefix: "posttable".into(),
        }
    }
}

/// `[logging]` exactly as written in the file, every key optional
#[derive(Debug, Deserialize, Default)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<PathBuf>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Fill the gaps of a (possibly absent) section with defaults
    pub fn resolve(section: Option<LoggingSection>) -> Self {
        let Some(section) = section else {
            return Self::default();
        };
        let mut config = Self::default();
        if let Some(level) = section.level {
            config.level = level;
        }
        if let Some(enabled) = section.file_enabled {
            config.file_enabled = enabled;
        }
        if let Some(dir) = section.file_dir {
            config.file_dir = dir;
        }
        if let Some(rotation) = section.file_rotation {
            config.file_rotation = LogRotation::parse(&rotation);
        }
        if let Some(prefix) = section.file_prefix {
            config.file_prefix = prefix;
        }
        config
    }
}
