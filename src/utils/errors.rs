//! Error handling for ChessBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for ChessBuddy application
#[derive(Error, Debug)]
pub enum ChessBuddyError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for ChessBuddy operations
pub type Result<T> = std::result::Result<T, ChessBuddyError>;

impl ChessBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ChessBuddyError::Telegram(_) => true,
            ChessBuddyError::Config(_) => false,
            ChessBuddyError::PermissionDenied(_) => false,
            ChessBuddyError::UserNotFound { .. } => false,
            ChessBuddyError::InvalidStateTransition { .. } => false,
            ChessBuddyError::Serialization(_) => false,
            ChessBuddyError::Io(_) => true,
            ChessBuddyError::InvalidInput(_) => false,
        }
    }
}
