use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::core::{PageSizes, ALL_MODE_PAGE_SIZE, DEFAULT_PAGE_SIZE};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    #[validate(nested)]
    pub pagination: PaginationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[validate(range(min = 1))]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String { "http://localhost:3000".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_page_sizes"))]
pub struct PaginationSettings {
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1))]
    pub default_page_size: u64,
    #[serde(default = "default_all_mode_page_size")]
    #[validate(range(min = 1))]
    pub all_mode_page_size: u64,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            all_mode_page_size: default_all_mode_page_size(),
        }
    }
}

impl PaginationSettings {
    pub fn page_sizes(&self) -> PageSizes {
        PageSizes {
            default: self.default_page_size,
            all_mode: self.all_mode_page_size,
        }
    }
}

fn default_page_size() -> u64 { DEFAULT_PAGE_SIZE }
fn default_all_mode_page_size() -> u64 { ALL_MODE_PAGE_SIZE }

fn validate_page_sizes(settings: &PaginationSettings) -> Result<(), ValidationError> {
    if settings.all_mode_page_size < settings.default_page_size {
        return Err(ValidationError::new("all_mode_page_size_below_default"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCH_VIEW__)
    /// 5. BACKEND_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCH_VIEW__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings = substitute_env_vars(settings)?;

        finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        finish(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MATCH_VIEW")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn finish(settings: Config) -> Result<Settings, ConfigError> {
    let settings: Settings = settings.try_deserialize()?;
    settings
        .validate()
        .map_err(|e| ConfigError::Message(format!("Invalid configuration: {}", e)))?;
    Ok(settings)
}

/// Apply the plain `BACKEND_URL` variable on top of the layered sources
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let Ok(backend_url) = std::env::var("BACKEND_URL") else {
        return Ok(settings);
    };

    Config::builder()
        .add_source(settings)
        .set_override("backend.base_url", backend_url)?
        .build()
}
