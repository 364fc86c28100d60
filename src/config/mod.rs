//! Configuration management
//!
//! This module handles loading and parsing configuration for the dogpost client.
//! Configuration can be loaded from:
//! - a YAML file (`dogpost.yml` by default)
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend and third-party endpoints
    #[serde(default)]
    pub api: ApiConfig,
    /// Client-side input limits
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the post API (no trailing slash required)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Random dog image endpoint
    #[serde(default = "default_dog_image_url")]
    pub dog_image_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            dog_image_url: default_dog_image_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_dog_image_url() -> String {
    "https://dog.ceo/api/breeds/image/random".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Limits enforced before anything is sent to the server.
///
/// The server re-validates every field; these only save a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_title_max_length")]
    pub title_max_length: usize,
    #[serde(default = "default_content_max_length")]
    pub content_max_length: usize,
    #[serde(default = "default_user_name_max_length")]
    pub user_name_max_length: usize,
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    #[serde(default = "default_password_max_length")]
    pub password_max_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            title_max_length: default_title_max_length(),
            content_max_length: default_content_max_length(),
            user_name_max_length: default_user_name_max_length(),
            password_min_length: default_password_min_length(),
            password_max_length: default_password_max_length(),
        }
    }
}

fn default_title_max_length() -> usize {
    20
}

fn default_content_max_length() -> usize {
    100
}

fn default_user_name_max_length() -> usize {
    20
}

fn default_password_min_length() -> usize {
    8
}

fn default_password_max_length() -> usize {
    255
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - DOGPOST_API_BASE_URL
    /// - DOGPOST_API_DOG_IMAGE_URL
    /// - DOGPOST_API_TIMEOUT_SECONDS
    /// - DOGPOST_VALIDATION_TITLE_MAX_LENGTH
    /// - DOGPOST_VALIDATION_CONTENT_MAX_LENGTH
    /// - DOGPOST_VALIDATION_USER_NAME_MAX_LENGTH
    /// - DOGPOST_VALIDATION_PASSWORD_MIN_LENGTH
    /// - DOGPOST_VALIDATION_PASSWORD_MAX_LENGTH
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the client cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url cannot be empty".to_string(),
            ));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.validation.password_min_length > self.validation.password_max_length {
            return Err(ConfigError::ValidationError(format!(
                "validation.password_min_length ({}) exceeds password_max_length ({})",
                self.validation.password_min_length, self.validation.password_max_length
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DOGPOST_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Ok(url) = std::env::var("DOGPOST_API_DOG_IMAGE_URL") {
            self.api.dog_image_url = url;
        }
        if let Some(timeout) = env_number("DOGPOST_API_TIMEOUT_SECONDS") {
            self.api.timeout_seconds = timeout;
        }

        let limits = &mut self.validation;
        if let Some(n) = env_number("DOGPOST_VALIDATION_TITLE_MAX_LENGTH") {
            limits.title_max_length = n;
        }
        if let Some(n) = env_number("DOGPOST_VALIDATION_CONTENT_MAX_LENGTH") {
            limits.content_max_length = n;
        }
        if let Some(n) = env_number("DOGPOST_VALIDATION_USER_NAME_MAX_LENGTH") {
            limits.user_name_max_length = n;
        }
        if let Some(n) = env_number("DOGPOST_VALIDATION_PASSWORD_MIN_LENGTH") {
            limits.password_min_length = n;
        }
        if let Some(n) = env_number("DOGPOST_VALIDATION_PASSWORD_MAX_LENGTH") {
            limits.password_max_length = n;
        }
    }
}

/// Read a numeric env var; invalid values are ignored
fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
