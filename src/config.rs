//! Configuration management for the airport weather service
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "AIRPORT_WEATHER_CONFIG";

/// Root configuration structure for the airport weather service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Atmospheric store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Health report configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Bulk airport loader configuration
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_server_host")]
    pub host: String,
    /// TCP port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// What adding an already registered airport does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Replace the metadata and reset the weather snapshot
    #[default]
    Replace,
    /// Fail with `DuplicateAirport` and keep the existing airport untouched
    Reject,
}

/// Atmospheric store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// Health report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Snapshots updated within this window count as fresh
    #[serde(default = "default_freshness_window_ms")]
    pub freshness_window_ms: i64,
    /// Maximum length of the radius histogram; larger radii land in the last bucket
    #[serde(default = "default_histogram_buckets")]
    pub histogram_buckets: usize,
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

/// Bulk airport loader settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Airport dataset loaded at startup, if any
    #[serde(default)]
    pub airports_file: Option<PathBuf>,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    9090
}

fn default_freshness_window_ms() -> i64 {
    86_400_000
}

fn default_histogram_buckets() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: default_freshness_window_ms(),
            histogram_buckets: default_histogram_buckets(),
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

impl WeatherServiceConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. AIRPORT_WEATHER_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("AIRPORT_WEATHER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherServiceConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
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

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.health.freshness_window_ms <= 0 {
            return Err(WeatherError::config(
                "Health freshness window must be a positive number of milliseconds",
            )
            .into());
        }

        if self.health.histogram_buckets == 0 || self.health.histogram_buckets > 10_000 {
            return Err(WeatherError::config(
                "Health histogram buckets must be between 1 and 10000",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }

}

impl ServerConfig {
    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
