//! Configuration management for `surfcast`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SurfcastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfcastConfig {
    /// StormGlass provider configuration
    #[serde(default)]
    pub stormglass: StormGlassConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// StormGlass provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StormGlassConfig {
    /// API token sent in the `Authorization` header
    pub api_token: Option<String>,
    /// Base URL of the StormGlass API
    #[serde(default = "default_stormglass_api_url")]
    pub api_url: String,
    /// Data source picked for every metric (noaa, sg, icon, ...)
    #[serde(default = "default_stormglass_source")]
    pub source: String,
    /// How many days ahead to request
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Use the persistent cache; the in-memory cache is used otherwise
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Cache TTL in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_stormglass_api_url() -> String {
    "https://api.stormglass.io/v2".to_string()
}

fn default_stormglass_source() -> String {
    "noaa".to_string()
}

fn default_forecast_days() -> u32 {
    1
}

fn default_timeout() -> u32 {
    30
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_cache_location() -> String {
    "~/.cache/surfcast".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for StormGlassConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_url: default_stormglass_api_url(),
            source: default_stormglass_source(),
            forecast_days: default_forecast_days(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SurfcastConfig {
    fn default() -> Self {
        Self {
            stormglass: StormGlassConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StormGlassConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Cache directory with a leading `~` expanded to the home directory
    #[must_use]
    pub fn resolved_location(&self) -> PathBuf {
        match self.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.location)),
            None => PathBuf::from(&self.location),
        }
    }
}

impl SurfcastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SURFCAST_STORMGLASS__API_TOKEN -> stormglass.api_token
        builder = builder.add_source(
            Environment::with_prefix("SURFCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SurfcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("surfcast").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.stormglass.api_url.is_empty() {
            self.stormglass.api_url = default_stormglass_api_url();
        }
        if self.stormglass.source.is_empty() {
            self.stormglass.source = default_stormglass_source();
        }
        if self.stormglass.forecast_days == 0 {
            self.stormglass.forecast_days = default_forecast_days();
        }
        if self.stormglass.timeout_seconds == 0 {
            self.stormglass.timeout_seconds = default_timeout();
        }
        if self.cache.ttl_seconds == 0 {
            self.cache.ttl_seconds = default_cache_ttl();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Check that a usable API token is configured
    pub fn validate_api_token(&self) -> Result<()> {
        match self.stormglass.api_token.as_deref() {
            None | Some("") => Err(SurfcastError::config(
                "StormGlass API token is required. Set SURFCAST_STORMGLASS__API_TOKEN or stormglass.api_token.",
            )
            .into()),
            Some(token) if token.len() < 8 => Err(SurfcastError::config(
                "StormGlass API token appears to be invalid (too short). Please check your API token.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.stormglass.forecast_days > 10 {
            return Err(SurfcastError::config("Forecast window cannot exceed 10 days").into());
        }

        if self.stormglass.timeout_seconds > 300 {
            return Err(
                SurfcastError::config("StormGlass timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.cache.ttl_seconds > 7 * 24 * 60 * 60 {
            return Err(SurfcastError::config("Cache TTL cannot exceed 1 week").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SurfcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SurfcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.stormglass.api_url.starts_with("http://")
            && !self.stormglass.api_url.starts_with("https://")
        {
            return Err(SurfcastError::config(
                "StormGlass API URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SurfcastConfig::default();
        assert_eq!(config.stormglass.api_url, "https://api.stormglass.io/v2");
        assert_eq!(config.stormglass.source, "noaa");
        assert_eq!(config.stormglass.forecast_days, 1);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.logging.level, "info");
        assert!(config.stormglass.api_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_token_is_rejected() {
        let config = SurfcastConfig::default();
        let result = config.validate_api_token();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API token is required"));
    }

    #[test]
    fn test_valid_api_token() {
        let mut config = SurfcastConfig::default();
        config.stormglass.api_token = Some("valid_api_token_123".to_string());
        assert!(config.validate_api_token().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = SurfcastConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_numeric_ranges() {
        let mut config = SurfcastConfig::default();
        config.stormglass.forecast_days = 30;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot exceed 10 days"));
    }

    #[test]
    fn test_apply_defaults_fills_zero_values() {
        let mut config = SurfcastConfig::default();
        config.stormglass.forecast_days = 0;
        config.cache.ttl_seconds = 0;
        config.logging.format = String::new();

        config.apply_defaults();

        assert_eq!(config.stormglass.forecast_days, 1);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[stormglass]\napi_token = \"file_token_12345\"\nsource = \"sg\"\n\n[cache]\nttl_seconds = 600"
        )
        .unwrap();

        let config = SurfcastConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.stormglass.api_token.as_deref(), Some("file_token_12345"));
        assert_eq!(config.stormglass.source, "sg");
        assert_eq!(config.cache.ttl_seconds, 600);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_resolved_location_without_tilde() {
        let cache = CacheConfig {
            location: "/tmp/surfcast".to_string(),
            ..CacheConfig::default()
        };
        assert_eq!(cache.resolved_location(), PathBuf::from("/tmp/surfcast"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = SurfcastConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("surfcast"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
