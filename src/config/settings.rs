//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub sms: SmsConfig,
    pub meetings: MeetingConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// API token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Outbound email gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
    pub timeout_seconds: u64,
}

/// Outbound SMS/MMS gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_number: String,
    pub timeout_seconds: u64,
}

/// Video meeting link configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeetingConfig {
    pub base_url: String,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_files: u32,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    /// When false, outbound email/SMS is logged to the console instead of
    /// hitting the provider APIs. Development default.
    pub deliver_messages: bool,
    /// Enables the background loop that dispatches scheduled announcements.
    pub scheduled_dispatch: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("FLOCKKEEPER").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::FlockKeeperError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                rate_limit_per_minute: 120,
                rate_limit_burst: 20,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/flockkeeper".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                token_ttl_hours: 24,
            },
            email: EmailConfig {
                api_url: "https://api.mailchannel.example/v1".to_string(),
                api_key: String::new(),
                from_address: "no-reply@flockkeeper.app".to_string(),
                timeout_seconds: 10,
            },
            sms: SmsConfig {
                api_url: "https://api.smschannel.example/v1".to_string(),
                api_key: String::new(),
                from_number: "+15550000000".to_string(),
                timeout_seconds: 10,
            },
            meetings: MeetingConfig {
                base_url: "https://meet.jit.si".to_string(),
            },
            i18n: I18nConfig {
                default_language: "en".to_string(),
                supported_languages: vec!["en".to_string(), "es".to_string()],
                translations_dir: "translations".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/flockkeeper".to_string(),
                max_files: 5,
            },
            features: FeaturesConfig {
                deliver_messages: false,
                scheduled_dispatch: true,
            },
        }
    }
}
