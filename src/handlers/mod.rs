//! Telegram update handlers

pub mod callbacks;
pub mod commands;
pub mod keyboards;
pub mod messages;
