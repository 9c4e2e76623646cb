//! ChessBuddy Telegram Bot
//!
//! A Telegram bot for a chess school: registration, class booking with a
//! fixed weekly schedule, profile editing, support contact and operator
//! broadcasts. Records live in flat JSON files; conversation state lives
//! in process memory.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ChessBuddyError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{ConversationState, StateStorage};
pub use storage::StorageService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
