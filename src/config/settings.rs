//! TOML-based configuration for Reportq.
//!
//! Supports a config file (reportq.toml) with layered lookup.
//!
//! Example configuration:
//! ```toml
//! [query]
//! hard_timeout_ms = 45000
//! slow_query_threshold_ms = 30000
//!
//! [breaker]
//! enabled = true
//! failure_threshold = 3
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Query execution settings.
    pub query: QuerySettings,

    /// Circuit-breaker settings.
    pub breaker: BreakerSettings,
}

/// Query execution settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Hard per-statement timeout in milliseconds. The backend aborts the
    /// statement once this budget is exhausted.
    pub hard_timeout_ms: u64,

    /// Soft slow-query threshold in milliseconds. Exceeding it logs a
    /// warning without failing the request. Must not exceed the hard
    /// timeout.
    pub slow_query_threshold_ms: u64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            hard_timeout_ms: 45_000,
            slow_query_threshold_ms: 45_000,
        }
    }
}

impl QuerySettings {
    /// The hard statement timeout as a [`Duration`].
    pub fn hard_timeout(&self) -> Duration {
        Duration::from_millis(self.hard_timeout_ms)
    }

    /// The soft slow-query threshold as a [`Duration`].
    pub fn soft_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_query_threshold_ms)
    }
}

/// Circuit-breaker settings.
///
/// When enabled, a definition whose consecutive failure count reaches
/// `failure_threshold` is refused without contacting the backend until a
/// success resets the counter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BreakerSettings {
    /// Enable the per-definition circuit breaker.
    pub enabled: bool,

    /// Consecutive failures after which a definition is disabled.
    pub failure_threshold: u32,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            failure_threshold: 3,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `REPORTQ_CONFIG`
    /// 2. `./reportq.toml`
    /// 3. `~/.config/reportq/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        // Check environment variable first
        if let Ok(path) = env::var("REPORTQ_CONFIG") {
            return Self::from_file(&path);
        }

        // Check local directory
        let local_config = PathBuf::from("reportq.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        // Check user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("reportq").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.query.hard_timeout_ms == 0 {
            return Err(SettingsError::InvalidConfig(
                "query.hard_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.query.slow_query_threshold_ms > self.query.hard_timeout_ms {
            return Err(SettingsError::InvalidConfig(format!(
                "query.slow_query_threshold_ms ({}) exceeds query.hard_timeout_ms ({})",
                self.query.slow_query_threshold_ms, self.query.hard_timeout_ms
            )));
        }
        if self.breaker.enabled && self.breaker.failure_threshold == 0 {
            return Err(SettingsError::InvalidConfig(
                "breaker.failure_threshold must be greater than zero when the breaker is enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
