//! Configuration management for upsearch
//!
//! This module handles loading, validation, and management of
//! upsearch configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

/// Environment variable consulted when no token is configured
pub const TOKEN_ENV_VAR: &str = "UP_API_TOKEN";

/// Selector name reserved for searching every configured account
pub const ALL_ACCOUNTS: &str = "ALL";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Up Bank API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the Up Bank REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Personal access token; when empty, the UP_API_TOKEN
    /// environment variable is used instead
    #[serde(default)]
    pub token: String,
    /// Transactions requested per account (1-100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            page_size: default_page_size(),
        }
    }
}

impl UpstreamConfig {
    /// Resolve the API token, falling back to the UP_API_TOKEN
    /// environment variable when the config field is empty
    pub fn bearer_token(&self) -> String {
        if self.token.is_empty() {
            std::env::var(TOKEN_ENV_VAR).unwrap_or_default()
        } else {
            self.token.clone()
        }
    }
}

fn default_base_url() -> String {
    "https://api.up.com.au/api/v1".to_string()
}

fn default_page_size() -> u32 {
    100
}

/// A named account exposed to search requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Selector name used in search requests (e.g. "GROCERIES")
    pub name: String,
    /// Up Bank account identifier
    pub id: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Up Bank API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Named accounts, in the order "ALL" fetches them
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;

        // Try to parse the YAML
        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate port
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        // Validate upstream settings
        if self.upstream.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "upstream.base_url".to_string(),
                reason: "Base URL must not be empty".to_string(),
            });
        }

        if self.upstream.page_size < 1 || self.upstream.page_size > 100 {
            return Err(ConfigError::InvalidValue {
                field: "upstream.page_size".to_string(),
                reason: "Page size must be between 1 and 100".to_string(),
            });
        }

        // Validate the account table
        let mut seen = std::collections::HashSet::new();
        for entry in &self.accounts {
            if entry.name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "accounts".to_string(),
                    reason: "Account name must not be empty".to_string(),
                });
            }
            if entry.name == ALL_ACCOUNTS {
                return Err(ConfigError::InvalidValue {
                    field: "accounts".to_string(),
                    reason: format!("\"{}\" is reserved for searching every account", ALL_ACCOUNTS),
                });
            }
            if entry.id.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "accounts".to_string(),
                    reason: format!("Account \"{}\" has an empty id", entry.name),
                });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "accounts".to_string(),
                    reason: format!("Duplicate account name: {}", entry.name),
                });
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Names of all configured accounts, in configuration order
    pub fn account_names(&self) -> Vec<String> {
        self.accounts.iter().map(|a| a.name.clone()).collect()
    }
}
