//! Configuration settings structures.
//!
//! Defines all configuration sections that can be loaded from TOML files and
//! environment variables, with serde defaults so a bare deployment starts
//! with sensible values.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::error::ConfigError;
use crate::error::{AppError, AppResult};
use crate::logger::LogFormat;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "opsdesk".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_reminder_cron() -> String {
    // Top of every hour, matching the original deployment's hourly sweep
    "0 0 * * * *".to_string()
}

// ============================================================================
// Settings sections
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ApplicationSettings {
    #[serde(default = "default_app_name")]
    #[validate(length(min = 1, message = "Application name must not be empty"))]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    #[validate(length(min = 1, message = "Host must not be empty"))]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, message = "Request timeout must be at least 1 second"))]
    pub request_timeout: u64,
}

impl ServerSettings {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DatabaseSettings {
    /// Database connection URL; falls back to `DATABASE_URL` when empty
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1, message = "Connection pool needs at least one connection"))]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl DatabaseSettings {
    /// Resolves the connection URL from settings or the environment.
    pub fn resolve_url(&self) -> AppResult<String> {
        if !self.url.is_empty() {
            return Ok(self.url.clone());
        }
        std::env::var("DATABASE_URL").map_err(|e| AppError::Configuration {
            key: "database.url".to_string(),
            source: anyhow::Error::from(e),
        })
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

/// Logger output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoggerSettings {
    /// Log level filter (trace, debug, info, warn, error or an EnvFilter directive)
    #[serde(default = "default_log_level")]
    #[validate(length(min = 1, message = "Log level must not be empty"))]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Booking reminder sweep configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ReminderSettings {
    /// Whether the in-process cron schedule runs while serving
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cron expression (with seconds field) for the sweep schedule
    #[serde(default = "default_reminder_cron")]
    #[validate(length(min = 1, message = "Cron expression must not be empty"))]
    pub cron: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cron: default_reminder_cron(),
        }
    }
}

/// Root settings tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub reminders: ReminderSettings,
}

impl Settings {
    /// Validates every section, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_section("application", self.application.validate())?;
        validate_section("server", self.server.validate())?;
        validate_section("database", self.database.validate())?;
        validate_section("logger", self.logger.validate())?;
        validate_section("reminders", self.reminders.validate())?;
        Ok(())
    }
}

fn validate_section(
    section: &str,
    result: Result<(), validator::ValidationErrors>,
) -> Result<(), ConfigError> {
    result.map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        ConfigError::Invalid {
            field: format!("{}.{}", section, field),
            reason: errors.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.address(), "127.0.0.1:3000");
        assert!(settings.reminders.enabled);
    }

    #[test]
    fn test_empty_log_level_is_rejected() {
        let mut settings = Settings::default();
        settings.logger.level = String::new();
        let err = settings.validate().unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "logger.level"),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_pool_size_is_rejected() {
        let mut settings = Settings::default();
        settings.database.max_connections = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_round_trip_through_toml() {
        let settings = Settings::default();
        let serialized = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_database_url_from_settings_wins() {
        let settings = DatabaseSettings {
            url: "postgres://localhost/opsdesk".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.resolve_url().unwrap(),
            "postgres://localhost/opsdesk"
        );
    }
}
