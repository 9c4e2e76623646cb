//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{ChessBuddyError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_storage_config(&settings.storage)?;
    validate_broadcast_config(&settings.broadcast)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(ChessBuddyError::Config("Bot token is required".to_string()));
    }

    if config.admin_id == 0 {
        return Err(ChessBuddyError::Config(
            "Admin ID must be configured".to_string(),
        ));
    }

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.data_dir.is_empty() {
        return Err(ChessBuddyError::Config(
            "Storage data directory is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate broadcast pacing configuration
fn validate_broadcast_config(config: &super::BroadcastConfig) -> Result<()> {
    if config.progress_every == 0 {
        return Err(ChessBuddyError::Config(
            "Broadcast progress interval must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ChessBuddyError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ChessBuddyError::Config(format!(
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
        Settings {
            bot: crate::config::BotConfig {
                token: "123:abc".to_string(),
                admin_id: 42,
                cancel_notify_id: None,
            },
            ..Settings::default()
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_token_rejected() {
        let mut settings = valid_settings();
        settings.bot.token = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_admin_id_rejected() {
        let mut settings = valid_settings();
        settings.bot.admin_id = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "loud".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
