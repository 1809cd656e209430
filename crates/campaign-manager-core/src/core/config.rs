//! Configuration for the campaign manager
//!
//! Settings are read from a TOML file, then overridden from the environment.
//! The chat-completion credential is only ever supplied externally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use crate::constants::{
    DEFAULT_AI_ENDPOINT, DEFAULT_AI_MARKET, DEFAULT_AI_MODEL, DEFAULT_AI_TEMPERATURE,
    DEFAULT_ANALYSIS_INTERVAL_SECS,
};
use crate::types::{Error, Result};
use crate::{log_info, log_warn};

/// Available storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageType {
    /// In-memory property store, lost on restart
    Memory,
    /// One JSON file per identity under `data_dir`
    File,
}

impl std::str::FromStr for StorageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageType::Memory),
            "file" => Ok(StorageType::File),
            other => Err(Error::config(format!(
                "Invalid storage type: {}. Valid options: memory, file",
                other
            ))),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat-completion configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Periodic analysis configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address
    #[serde(default = "default_http_addr")]
    pub http_addr: SocketAddr,

    /// Request header carrying the caller identity
    #[serde(default = "default_identity_header")]
    pub identity_header: String,

    /// Identity used when the header is absent (single-user deployments)
    #[serde(default)]
    pub default_identity: Option<String>,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type
    #[serde(default = "default_storage_type")]
    pub storage_type: StorageType,

    /// Data directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Chat-completion configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Chat-completion endpoint URL
    #[serde(default = "default_ai_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with every request
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_ai_temperature")]
    pub temperature: f64,

    /// Client timeout in seconds
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,

    /// Target market named in every prompt
    #[serde(default = "default_ai_market")]
    pub market: String,

    /// Bearer credential; never serialized back out
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

/// Periodic analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Run the periodic analysis loop
    #[serde(default = "default_scheduler_enabled")]
    pub enabled: bool,

    /// Seconds between analysis runs
    #[serde(default = "default_analysis_interval_secs")]
    pub interval_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            identity_header: default_identity_header(),
            default_identity: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: default_storage_type(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ai_endpoint(),
            model: default_ai_model(),
            temperature: default_ai_temperature(),
            timeout_secs: default_ai_timeout_secs(),
            market: default_ai_market(),
            api_key: None,
        }
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("market", &self.market)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_scheduler_enabled(),
            interval_secs: default_analysis_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions for serde
fn default_http_addr() -> SocketAddr { SocketAddr::from(([0, 0, 0, 0], 8080)) }
fn default_identity_header() -> String { "x-forwarded-email".to_string() }
fn default_storage_type() -> StorageType { StorageType::Memory }
fn default_data_dir() -> PathBuf { PathBuf::from("./data") }
fn default_ai_endpoint() -> String { DEFAULT_AI_ENDPOINT.to_string() }
fn default_ai_model() -> String { DEFAULT_AI_MODEL.to_string() }
fn default_ai_temperature() -> f64 { DEFAULT_AI_TEMPERATURE }
fn default_ai_timeout_secs() -> u64 { 30 }
fn default_ai_market() -> String { DEFAULT_AI_MARKET.to_string() }
fn default_scheduler_enabled() -> bool { true }
fn default_analysis_interval_secs() -> u64 { DEFAULT_ANALYSIS_INTERVAL_SECS }
fn default_log_level() -> String { "info".to_string() }

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    fn apply_overrides<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = var("CM_HTTP_ADDR") {
            self.server.http_addr = addr.parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        }

        if let Some(identity) = var("CM_DEFAULT_IDENTITY") {
            self.server.default_identity = Some(identity);
        }

        if let Some(data_dir) = var("CM_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Some(storage_type) = var("CM_STORAGE_TYPE") {
            self.storage.storage_type = storage_type.parse()?;
        }

        if let Some(level) = var("CM_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(endpoint) = var("CM_AI_ENDPOINT") {
            self.ai.endpoint = endpoint;
        }

        if let Some(model) = var("CM_AI_MODEL") {
            self.ai.model = model;
        }

        if let Some(key) = var("CM_AI_API_KEY").or_else(|| var("OPENAI_API_KEY")) {
            if !key.trim().is_empty() {
                self.ai.api_key = Some(key);
            }
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::config("Invalid log level")),
        }

        if self.scheduler.interval_secs == 0 {
            return Err(Error::config("Scheduler interval must be greater than zero"));
        }

        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(Error::config("AI temperature must be within [0, 2]"));
        }

        if self.server.identity_header.trim().is_empty() {
            return Err(Error::config("Identity header name cannot be empty"));
        }

        Ok(())
    }
}

/// Load configuration from file
pub fn load_config(path: &str) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;
    Config::from_toml(&contents)
}

/// Load configuration from file or use defaults, then apply environment overrides
pub fn load_config_or_default(path: Option<&str>) -> Result<Config> {
    load_config_with(path, |name| std::env::var(name).ok())
}

fn load_config_with<F>(path: Option<&str>, var: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => match load_config(path) {
            Ok(config) => {
                log_info!("Loaded configuration from: {}", path);
                config
            }
            Err(e) => {
                log_warn!("Failed to load config from {}: {}. Using defaults.", path, e);
                Config::default()
            }
        },
        None => {
            log_info!("No config file specified, using defaults");
            Config::default()
        }
    };

    config.apply_overrides(var)?;
    config.validate()?;
    Ok(config)
}
