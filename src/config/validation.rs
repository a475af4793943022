//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{FlockKeeperError, Result};

use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_gateway_config(settings)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(FlockKeeperError::Config(
            "Server host is required".to_string(),
        ));
    }

    if config.port == 0 {
        return Err(FlockKeeperError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    if config.rate_limit_per_minute == 0 {
        return Err(FlockKeeperError::Config(
            "Rate limit must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(FlockKeeperError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(FlockKeeperError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(FlockKeeperError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate API token configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.len() < 32 {
        return Err(FlockKeeperError::Config(
            "JWT secret must be at least 32 characters".to_string(),
        ));
    }

    if config.token_ttl_hours <= 0 {
        return Err(FlockKeeperError::Config(
            "Token TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate the outbound gateway configuration.
///
/// Gateway credentials are only required when message delivery is enabled;
/// the console gateways used in development need none.
fn validate_gateway_config(settings: &Settings) -> Result<()> {
    if !settings.features.deliver_messages {
        return Ok(());
    }

    if settings.email.api_url.is_empty() || settings.email.api_key.is_empty() {
        return Err(FlockKeeperError::Config(
            "Email gateway URL and API key are required when delivery is enabled".to_string(),
        ));
    }

    if settings.email.from_address.is_empty() {
        return Err(FlockKeeperError::Config(
            "Email from address is required when delivery is enabled".to_string(),
        ));
    }

    if settings.sms.api_url.is_empty() || settings.sms.api_key.is_empty() {
        return Err(FlockKeeperError::Config(
            "SMS gateway URL and API key are required when delivery is enabled".to_string(),
        ));
    }

    if settings.email.timeout_seconds == 0 || settings.sms.timeout_seconds == 0 {
        return Err(FlockKeeperError::Config(
            "Gateway timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(FlockKeeperError::Config(
            "Default language is required".to_string(),
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(FlockKeeperError::Config(
            "At least one supported language is required".to_string(),
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(FlockKeeperError::Config(
            "Default language must be in supported languages list".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FlockKeeperError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(FlockKeeperError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "a-test-secret-that-is-long-enough-123456".to_string();
        settings
    }

    #[test]
    fn test_default_settings_validate_with_secret() {
        let settings = valid_settings();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let mut settings = valid_settings();
        settings.auth.jwt_secret = "short".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_delivery_requires_gateway_credentials() {
        let mut settings = valid_settings();
        settings.features.deliver_messages = true;
        // Defaults ship without API keys
        assert!(validate_settings(&settings).is_err());

        settings.email.api_key = "mail-key".to_string();
        settings.sms.api_key = "sms-key".to_string();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_default_language_must_be_supported() {
        let mut settings = valid_settings();
        settings.i18n.default_language = "fr".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 10;
        assert!(validate_settings(&settings).is_err());
    }
}
