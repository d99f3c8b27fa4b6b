//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `server.base_url`.
pub const ENV_BASE_URL: &str = "BASE_URL";
/// Environment variable overriding `auth.token`.
pub const ENV_API_TOKEN: &str = "API_TOKEN";

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing, defaults apply.
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub fixtures: FixtureConfig,
    pub logging: LoggingConfig,
}

/// Target server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL including any context path (e.g., "http://host:8080/auth-PM2").
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Credentials sent with requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token attached to every request when set.
    pub token: Option<String>,
    /// Token the server should reject with 401 or 403.
    pub insufficient_scope_token: String,
}

/// Server-side records the suites assume exist, plus tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Department that exists and has a subtree.
    pub existing_department_id: i64,
    /// A child of `existing_department_id`.
    pub child_department_id: i64,
    /// Id guaranteed not to exist, used for update, delete and link lookups.
    pub missing_id: i64,
    /// Id guaranteed not to exist, used for the department detail lookup.
    pub missing_detail_id: i64,
    pub move_department_id: i64,
    pub move_target_id: i64,
    pub self_move_id: i64,
    /// Descendant of `existing_department_id`, used to provoke a cycle.
    pub cycle_parent_id: i64,
    pub missing_parent_id: i64,
    pub existing_link_id: i64,
    pub name_filter: String,
    pub max_depth: i32,
    pub latency_budget_ms: u64,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Optional log file (daily rotation) in addition to stderr.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Per-user config file path, if the platform has one.
    pub fn user_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dept-api-contract").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => ConfigLoadResult::Loaded(config),
                Err(e) => ConfigLoadResult::Invalid(e),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BASE_URL` and `API_TOKEN` from the environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(std::env::var(ENV_BASE_URL).ok(), std::env::var(ENV_API_TOKEN).ok());
    }

    /// Apply explicit overrides; empty values are ignored.
    pub fn apply_overrides(&mut self, base_url: Option<String>, token: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.server.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.auth.token = Some(token);
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("Base URL cannot be empty".to_string()));
        }
        if !self.server.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Validation("Timeout must be at least 1 second".to_string()));
        }
        if self.fixtures.existing_department_id < 1 {
            return Err(ConfigError::Validation(
                "Existing department ID must be positive".to_string(),
            ));
        }
        if self.fixtures.existing_link_id < 1 {
            return Err(ConfigError::Validation("Existing link ID must be positive".to_string()));
        }
        if self.fixtures.max_depth < 0 {
            return Err(ConfigError::Validation("Max depth cannot be negative".to_string()));
        }
        if self.fixtures.latency_budget_ms == 0 {
            return Err(ConfigError::Validation(
                "Latency budget must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.1.23:8080/auth-PM2".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: None,
            insufficient_scope_token: "invalid-token".to_string(),
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            existing_department_id: 1,
            child_department_id: 2,
            missing_id: 9999,
            missing_detail_id: 99999,
            move_department_id: 3,
            move_target_id: 1,
            self_move_id: 2,
            cycle_parent_id: 3,
            missing_parent_id: 999,
            existing_link_id: 1,
            name_filter: "Kỹ thuật".to_string(),
            max_depth: 2,
            latency_budget_ms: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
