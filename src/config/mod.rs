//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{BotConfig, BroadcastConfig, LoggingConfig, Settings, StorageConfig};
