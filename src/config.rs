//! Configuration for the playground client
//!
//! Loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/cipherdeck/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default playground server
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the cipher playground server
    pub server_url: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Whether to also write JSON logs to rotating files
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,

    /// Rotation policy for log files
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "cipherdeck".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    server_url: Option<String>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<LogRotation>,
}

impl Config {
    /// Load configuration with env > file > defaults precedence
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(file) = Self::load_file() {
            if let Some(url) = file.server_url {
                config.server_url = url;
            }
            if let Some(logging) = file.logging {
                if let Some(level) = logging.level {
                    config.logging.level = level;
                }
                if let Some(enabled) = logging.file_enabled {
                    config.logging.file_enabled = enabled;
                }
                if let Some(dir) = logging.file_dir {
                    config.logging.file_dir = PathBuf::from(dir);
                }
                if let Some(prefix) = logging.file_prefix {
                    config.logging.file_prefix = prefix;
                }
                if let Some(rotation) = logging.file_rotation {
                    config.logging.file_rotation = rotation;
                }
            }
        }

        if let Ok(url) = std::env::var("CIPHERDECK_SERVER") {
            if !url.is_empty() {
                config.server_url = url;
            }
        }
        if let Ok(level) = std::env::var("CIPHERDECK_LOG") {
            if !level.is_empty() {
                config.logging.level = level;
            }
        }

        config
    }

    /// Path of the config file, if a config directory exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cipherdeck").join("config.toml"))
    }

    fn load_file() -> Option<FileConfig> {
        let path = Self::config_path()?;
        let contents = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&contents) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Warning: ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write a commented template on first run so options are discoverable
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> String {
        format!(
            "# cipherdeck configuration\n\
             # Values here are overridden by CIPHERDECK_SERVER / CIPHERDECK_LOG.\n\
             \n\
             # Base URL of the cipher playground server\n\
             server_url = \"{}\"\n\
             \n\
             [logging]\n\
             # error | warn | info | debug | trace\n\
             level = \"{}\"\n\
             # Write JSON logs to rotating files in addition to the in-app view\n\
             file_enabled = {}\n\
             file_dir = \"{}\"\n\
             file_prefix = \"{}\"\n\
             # hourly | daily | never\n\
             file_rotation = \"{}\"\n",
            self.server_url,
            self.logging.level,
            self.logging.file_enabled,
            self.logging.file_dir.display(),
            self.logging.file_prefix,
            match self.logging.file_rotation {
                LogRotation::Hourly => "hourly",
                LogRotation::Daily => "daily",
                LogRotation::Never => "never",
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Default config must round-trip through its own template, catching
    /// TOML syntax errors in `to_toml`
    #[test]
    fn test_config_roundtrip_default() {
        let config = Config::default();
        let toml_str = config.to_toml();
        let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
        assert!(
            parsed.is_ok(),
            "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
            toml_str,
            parsed.err()
        );
        let file = parsed.unwrap();
        assert_eq!(file.server_url.as_deref(), Some(DEFAULT_SERVER_URL));
        let logging = file.logging.expect("logging section");
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.file_rotation, Some(LogRotation::Daily));
    }
}
