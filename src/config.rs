//! Logger configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration file name, looked up beside the log file
const CONFIG_FILE_NAME: &str = "logger.toml";

/// Default retention ceiling: distinct entries kept after compaction
pub const DEFAULT_MAX_LOG_LINES: usize = 1000;

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Maximum distinct entries the log file may hold after compaction
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Whether console output is color-coded
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_max_lines() -> usize {
    DEFAULT_MAX_LOG_LINES
}

fn default_color() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            color: default_color(),
        }
    }
}

impl LoggerConfig {
    /// Path of the config file kept beside a log file
    pub fn path_beside(log_path: &Path) -> PathBuf {
        match log_path.parent() {
            Some(dir) => dir.join(CONFIG_FILE_NAME),
            None => PathBuf::from(CONFIG_FILE_NAME),
        }
    }

    /// Load the config stored beside `log_path`, or defaults if absent
    pub fn load_beside(log_path: &Path) -> Result<Self> {
        let path = Self::path_beside(log_path);
        if path.exists() {
            let content =
                std::fs::read_to_string(&path).context("Failed to read logger config file")?;
            toml::from_str(&content).context("Failed to parse logger config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Load the config beside `log_path`, writing defaults on first run
    ///
    /// A missing file is created with the default settings so users have
    /// something to edit; a file that cannot be written is not an error.
    pub fn load_or_init_beside(log_path: &Path) -> Result<Self> {
        let config = Self::load_beside(log_path)?;
        if !Self::path_beside(log_path).exists() {
            let _ = config.save_beside(log_path);
        }
        Ok(config)
    }

    /// Save the config beside `log_path`
    pub fn save_beside(&self, log_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize logger config")?;
        std::fs::write(Self::path_beside(log_path), content)
            .context("Failed to write logger config file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.max_lines, 1000);
        assert!(config.color);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = LoggerConfig {
            max_lines: 50,
            color: false,
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: LoggerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: LoggerConfig = toml::from_str("max_lines = 10").unwrap();
        assert_eq!(parsed.max_lines, 10);
        assert!(parsed.color);
    }

    #[test]
    fn test_load_beside_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("log.txt");
        let config = LoggerConfig::load_beside(&log_path).unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_load_or_init_writes_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("log.txt");
        let config_path = LoggerConfig::path_beside(&log_path);
        assert!(!config_path.exists());

        let config = LoggerConfig::load_or_init_beside(&log_path).unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert!(config_path.exists());

        // An edited file is loaded, not overwritten
        std::fs::write(&config_path, "max_lines = 7\ncolor = false\n").unwrap();
        let reloaded = LoggerConfig::load_or_init_beside(&log_path).unwrap();
        assert_eq!(reloaded.max_lines, 7);
        assert!(!reloaded.color);
    }

    #[test]
    fn test_save_and_load_beside() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("log.txt");

        let config = LoggerConfig {
            max_lines: 25,
            color: false,
        };
        config.save_beside(&log_path).unwrap();

        let loaded = LoggerConfig::load_beside(&log_path).unwrap();
        assert_eq!(loaded, config);
    }
}
