//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub broadcast: BroadcastConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// The operator account: receives support messages and registration
    /// notices, and is the only identity allowed to broadcast.
    pub admin_id: i64,
    /// Optional separate recipient for booking-cancellation notices.
    pub cancel_notify_id: Option<i64>,
}

/// Flat-file storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding users.json, bookings.json, broadcasts.json, admins.json
    pub data_dir: String,
}

/// Broadcast fan-out pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BroadcastConfig {
    /// Fixed delay between consecutive sends, in milliseconds
    pub delay_ms: u64,
    /// Emit a progress update every N successful deliveries
    pub progress_every: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CHESSBUDDY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ChessBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_id: 0,
                cancel_notify_id: None,
            },
            storage: StorageConfig {
                data_dir: "data".to_string(),
            },
            broadcast: BroadcastConfig {
                delay_ms: 100,
                progress_every: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
