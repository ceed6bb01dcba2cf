//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma-separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

/// Transactional email configuration
///
/// The mailer is optional: without an API key the notifier logs and skips
/// delivery instead of failing bookings.
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// Transactional email API endpoint
    #[serde(default = "default_mail_api_url")]
    pub api_url: String,

    /// Provider API key; delivery is disabled when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender display name
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Sender address
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Request timeout in seconds
    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,
}

fn default_mail_api_url() -> String {
    "https://api.brevo.com/v3/smtp/email".to_string()
}

fn default_sender_name() -> String {
    "ALC Valet Parking".to_string()
}

fn default_sender_email() -> String {
    "info@alcvaletparking.com".to_string()
}

fn default_mail_timeout() -> u64 {
    10
}

impl MailConfig {
    /// Check if delivery is configured
    pub fn enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: default_mail_api_url(),
            api_key: None,
            sender_name: default_sender_name(),
            sender_email: default_sender_email(),
            timeout_secs: default_mail_timeout(),
        }
    }
}

/// Document render service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    /// Render service endpoint producing PDF bytes
    #[serde(default = "default_render_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_render_timeout")]
    pub timeout_secs: u64,
}

fn default_render_url() -> String {
    "http://127.0.0.1:3100/render".to_string()
}

fn default_render_timeout() -> u64 {
    15
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            url: default_render_url(),
            timeout_secs: default_render_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.cors_origins", default_cors_origins())?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("mail.api_url", default_mail_api_url())?
            .set_default("mail.sender_name", default_sender_name())?
            .set_default("mail.sender_email", default_sender_email())?
            .set_default("mail.timeout_secs", 10)?
            .set_default("render.url", default_render_url())?
            .set_default("render.timeout_secs", 15)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with VALET_ prefix
            .add_source(
                Environment::with_prefix("VALET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = config.try_deserialize()?;

        // Plain env vars win over file values for the usual deploy knobs
        if let Ok(url) = env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(key) = env::var("BREVO_API_KEY") {
            config.mail.api_key = Some(key);
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("VALET").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mail_config() {
        let config = MailConfig::default();
        assert!(!config.enabled());
        assert_eq!(config.sender_name, "ALC Valet Parking");
        assert_eq!(config.api_url, "https://api.brevo.com/v3/smtp/email");
    }

    #[test]
    fn test_default_render_config() {
        let config = RenderConfig::default();
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9000,
                workers: 2,
                cors_origins: default_cors_origins(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/valet".to_string(),
                max_connections: 10,
                min_connections: 2,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
            },
            mail: MailConfig::default(),
            render: RenderConfig::default(),
        };

        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }
}
