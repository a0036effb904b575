//! Config - Application Configuration
//!
//! Loaded from `sales-dashboard.toml`. A missing or empty file yields the
//! defaults; unknown keys are ignored.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_API_BASE_URL, HISTOGRAM_BAR_WIDTH, REQUEST_TIMEOUT_SECS,
};
use crate::domain::month::Month;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Remote sales service
    pub api: ApiConfig,
    /// Dashboard behaviour
    pub dashboard: DashboardConfig,
    /// Logging
    pub log: LogConfig,
}

/// Remote sales service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:3000/api`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Month selected at startup
    pub default_month: Month,
    /// Width of the longest histogram bar in the console
    pub histogram_width: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_month: Month::default(),
            histogram_width: HISTOGRAM_BAR_WIDTH,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for daily rolling log files; stderr only when unset
    pub directory: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is unset (e.g. `info`)
    pub level: Option<String>,
}

impl AppConfig {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location when `None`
    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            info!(path = ?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(&path)?;
        Self::from_toml(&value).inspect_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
        })
    }

    /// Parse from TOML text
    pub fn from_toml(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(value)?)
    }

    /// Save to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let value = toml::to_string(self)?;
        std::fs::write(path, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = AppConfig::from_toml("  \n").expect("empty");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.dashboard.default_month, Month::Mar);
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "http://sales.internal:8080/api"

            [dashboard]
            default_month = "Jul"
            "#,
        )
        .expect("partial");
        assert_eq!(config.api.base_url, "http://sales.internal:8080/api");
        assert_eq!(config.api.timeout_secs, REQUEST_TIMEOUT_SECS);
        assert_eq!(config.dashboard.default_month, Month::Jul);
        assert_eq!(config.dashboard.histogram_width, HISTOGRAM_BAR_WIDTH);
    }

    #[test]
    fn test_invalid_month_is_an_error() {
        let result = AppConfig::from_toml("[dashboard]\ndefault_month = \"Smarch\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = AppConfig::default();
        config.api.timeout_secs = 5;
        config.dashboard.default_month = Month::Nov;
        config.log.level = Some("debug".to_string());
        config.save(&path).expect("save");

        let loaded = AppConfig::try_load(Some(&path)).expect("load");
        assert_eq!(loaded, config);
        assert_eq!(loaded.api.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded =
            AppConfig::try_load(Some(&dir.path().join("absent.toml"))).expect("missing file");
        assert_eq!(loaded, AppConfig::default());
    }
}
