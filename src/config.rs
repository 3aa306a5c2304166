//! Configuration management for fraudwatch
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::backend::ListResource;
use crate::constants::{
    CONFIG_GENERATED, DEFAULT_API_BASE_URL, DEFAULT_PER_PAGE, DEFAULT_STATS_REFRESH_SECS, DEFAULT_TIMEOUT_SECS,
    MAX_PER_PAGE, MAX_TIMEOUT_SECS,
};
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub grid: GridConfig,
    pub export: ExportConfig,
    pub stats: StatsConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the monitoring API, e.g. "http://localhost:5001/api"
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Data grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows requested per page
    pub per_page: u32,
    /// View opened on startup
    /// Options: "transactions", "alerts", "reactivations"
    pub default_view: String,
}

/// CSV export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exports and downloaded reports are written to
    pub directory: PathBuf,
}

/// Statistics strip configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Refresh interval in seconds (0 = refresh only with the list)
    pub refresh_interval_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a file in the data directory
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            default_view: ListResource::Transactions.path().to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_STATS_REFRESH_SECS,
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Option<PathBuf> {
        let current_dir_config = PathBuf::from("fraudwatch.toml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        Self::get_default_config_path().ok().filter(|path| path.exists())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("api.base_url cannot be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("api.base_url must start with http:// or https://, got '{}'", base_url);
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > MAX_TIMEOUT_SECS {
            anyhow::bail!(
                "api.timeout_secs must be between 1 and {} seconds, got {}",
                MAX_TIMEOUT_SECS,
                self.api.timeout_secs
            );
        }

        if self.grid.per_page == 0 || self.grid.per_page > MAX_PER_PAGE {
            anyhow::bail!(
                "grid.per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE,
                self.grid.per_page
            );
        }

        if self.default_view().is_none() {
            let available: Vec<&str> = ListResource::ALL.iter().map(|r| r.path()).collect();
            anyhow::bail!(
                "grid.default_view '{}' not found. Available views: {}",
                self.grid.default_view,
                available.join(", ")
            );
        }

        Ok(())
    }

    /// View to open on startup
    pub fn default_view(&self) -> Option<ListResource> {
        ListResource::from_name(&self.grid.default_view)
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# fraudwatch Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::ISO_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("fraudwatch"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
