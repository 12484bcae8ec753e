//! Configuration management for the gateway
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and validates the result before the server starts.

use crate::GatewayError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "CITYINFO_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream services and credential
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Credential sent as the `apiKey` query parameter to both services
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the city-insights service
    #[serde(default = "default_city_api_url")]
    pub city_api_url: String,
    /// Base URL of the weather-prediction service
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,
    /// Per-request timeout in seconds, none when absent
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
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

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_city_api_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_weather_api_url() -> String {
    "http://localhost:8082".to_string()
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
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            city_api_url: default_city_api_url(),
            weather_api_url: default_weather_api_url(),
            timeout_seconds: None,
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

impl GatewayConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from the given file, falling back to
    /// `config/default.toml`. Environment variables prefixed with `CITYINFO__`
    /// override file values, e.g. `CITYINFO__UPSTREAM__API_KEY`.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config/default.toml"));

        let settings = Config::builder()
            .add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                Environment::with_prefix("CITYINFO")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: GatewayConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Replace blank values with their defaults
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.upstream.city_api_url.is_empty() {
            self.upstream.city_api_url = default_city_api_url();
        }
        if self.upstream.weather_api_url.is_empty() {
            self.upstream.weather_api_url = default_weather_api_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> std::result::Result<(), GatewayError> {
        self.validate_upstream()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_upstream(&self) -> std::result::Result<(), GatewayError> {
        if self.upstream.api_key.trim().is_empty() {
            return Err(GatewayError::config(
                "Upstream API key is required. Set upstream.api_key or CITYINFO__UPSTREAM__API_KEY.",
            ));
        }

        for (name, url) in [
            ("city_api_url", &self.upstream.city_api_url),
            ("weather_api_url", &self.upstream.weather_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(GatewayError::config(format!(
                    "Upstream {name} must be a valid HTTP or HTTPS URL, got '{url}'"
                )));
            }
        }

        if let Some(timeout) = self.upstream.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(GatewayError::config(
                    "Upstream timeout must be between 1 and 300 seconds",
                ));
            }
        }

        Ok(())
    }

    fn validate_logging(&self) -> std::result::Result<(), GatewayError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(GatewayError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(GatewayError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        Ok(())
    }
}

impl ServerConfig {
    /// Address the HTTP listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
