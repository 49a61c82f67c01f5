//! Configuration management for Brevsok.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{BrevsokError, Result};
use crate::sort::SortKey;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for Brevsok.
///
/// ## Example Configuration File (brevsok.toml)
///
/// ```toml
/// [general]
/// corpus_path = "/data/letters.json.gz"
/// max_results = 50
/// default_sort = "date-asc"
///
/// [display]
/// page_size = 20
/// show_tags = true
/// show_route = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Result display settings
    pub display: DisplayConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Corpus export location (None = must be given on the command line)
    pub corpus_path: Option<PathBuf>,

    /// Maximum number of results to return
    pub max_results: usize,

    /// Sort applied when none is requested
    pub default_sort: String,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            corpus_path: None,
            max_results: 50,
            default_sort: SortKey::default().as_str().to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Result display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of results to display per page
    pub page_size: usize,

    /// Show tags under each result
    pub show_tags: bool,

    /// Show the location/destination route under each result
    pub show_route: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            page_size: 20,
            show_tags: true,
            show_route: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| BrevsokError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self).map_err(|e| BrevsokError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "brevsok").ok_or_else(|| BrevsokError::ConfigError {
            reason: "Could not determine config directory".to_string(),
        })?;

        Ok(dirs.config_dir().join("brevsok.toml"))
    }

    /// The configured default sort, falling back to date-ascending when the
    /// configured value is not a known key.
    pub fn default_sort(&self) -> SortKey {
        self.general.default_sort.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.max_results, 50);
        assert_eq!(config.default_sort(), SortKey::DateAsc);
        assert!(config.general.corpus_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut config = Config::default();
        config.general.corpus_path = Some(PathBuf::from("/data/letters.json.gz"));
        config.general.default_sort = "date-desc".to_string();
        config.display.page_size = 5;

        config.save_to(&config_path).unwrap();
        let loaded = Config::load_from(&config_path).unwrap();

        assert_eq!(
            loaded.general.corpus_path.as_deref(),
            Some(Path::new("/data/letters.json.gz"))
        );
        assert_eq!(loaded.default_sort(), SortKey::DateDesc);
        assert_eq!(loaded.display.page_size, 5);
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.general.max_results, 50); // Default value
    }

    #[test]
    fn test_load_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "general = 3").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, BrevsokError::ConfigError { .. }));
    }

    #[test]
    fn test_unknown_default_sort_falls_back() {
        let mut config = Config::default();
        config.general.default_sort = "relevance".to_string();
        assert_eq!(config.default_sort(), SortKey::DateAsc);
    }
}
