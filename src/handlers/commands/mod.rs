//! Command handlers module

pub mod admin;
pub mod help;
pub mod start;
