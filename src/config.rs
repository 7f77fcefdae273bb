//! Configuration management for the `WanderLens` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WanderLensError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `WanderLens` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WanderLensConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Hosted generative model configuration
    pub model: ModelConfig,
    /// Maps / geolocation configuration
    pub maps: MapsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Maximum request body size in MB (photo uploads arrive as data URIs)
    #[serde(default = "default_body_limit")]
    pub body_limit_mb: u32,
}

/// Hosted generative model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// API key; falls back to `GEMINI_API_KEY` / `GOOGLE_API_KEY`
    pub api_key: Option<String>,
    /// Base URL of the Generative Language API
    #[serde(default = "default_model_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_model_name")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_model_timeout")]
    pub timeout_seconds: u32,
}

/// Maps / IP geolocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// API key; falls back to `GOOGLE_MAPS_API_KEY`
    pub api_key: Option<String>,
    /// Base URL of the geolocation service
    #[serde(default = "default_maps_base_url")]
    pub base_url: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty, compact or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_body_limit() -> u32 {
    10
}

fn default_model_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model_name() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_model_timeout() -> u32 {
    60
}

fn default_maps_base_url() -> String {
    "https://www.googleapis.com".to_string()
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
            body_limit_mb: default_body_limit(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_model_base_url(),
            model: default_model_name(),
            timeout_seconds: default_model_timeout(),
        }
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_maps_base_url(),
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

impl ModelConfig {
    /// Configured key, or the one the hosting environment provides
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        non_empty(self.api_key.clone())
            .or_else(|| non_empty(std::env::var("GEMINI_API_KEY").ok()))
            .or_else(|| non_empty(std::env::var("GOOGLE_API_KEY").ok()))
    }
}

impl MapsConfig {
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        non_empty(self.api_key.clone())
            .or_else(|| non_empty(std::env::var("GOOGLE_MAPS_API_KEY").ok()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl WanderLensConfig {
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

        // WANDERLENS_SERVER__PORT=8080 style overrides
        builder = builder.add_source(
            Environment::with_prefix("WANDERLENS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WanderLensConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wanderlens").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.body_limit_mb == 0 {
            self.server.body_limit_mb = default_body_limit();
        }
        if self.model.base_url.is_empty() {
            self.model.base_url = default_model_base_url();
        }
        if self.model.model.is_empty() {
            self.model.model = default_model_name();
        }
        if self.model.timeout_seconds == 0 {
            self.model.timeout_seconds = default_model_timeout();
        }
        if self.maps.base_url.is_empty() {
            self.maps.base_url = default_maps_base_url();
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
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        for (label, key) in [("Model", &self.model.api_key), ("Maps", &self.maps.api_key)] {
            if let Some(api_key) = key {
                if api_key.trim().is_empty() {
                    return Err(WanderLensError::config(format!(
                        "{label} API key cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }

                if api_key.len() < 8 {
                    return Err(WanderLensError::config(format!(
                        "{label} API key appears to be invalid (too short). Please check your API key."
                    ))
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.model.timeout_seconds > 300 {
            return Err(
                WanderLensError::config("Model request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.body_limit_mb > 100 {
            return Err(
                WanderLensError::config("Request body limit cannot exceed 100 MB").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WanderLensError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WanderLensError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (label, url) in [("Model", &self.model.base_url), ("Maps", &self.maps.base_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WanderLensError::config(format!(
                    "{label} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
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
        let config = WanderLensConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert_eq!(config.model.timeout_seconds, 60);
        assert_eq!(config.logging.level, "info");
        assert!(config.maps.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = WanderLensConfig::default();
        config.maps.api_key = Some("abc".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WanderLensConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WanderLensConfig::default();
        config.model.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = WanderLensConfig::default();
        config.maps.base_url = "ftp://maps.example".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file_keeps_defaults_for_missing_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8088\n\n[maps]\napi_key = \"maps-key-123456\"\n"
        )
        .unwrap();

        let config = WanderLensConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.maps.api_key.as_deref(), Some("maps-key-123456"));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_configured_maps_key_wins() {
        let config = MapsConfig {
            api_key: Some("configured-key-1".to_string()),
            base_url: default_maps_base_url(),
        };
        assert_eq!(config.resolved_api_key().as_deref(), Some("configured-key-1"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WanderLensConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("wanderlens"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
