//! Data models module
//!
//! This module contains all data structures exchanged with the bot config service

pub mod bot_config;
pub mod page;

// Re-export commonly used models
pub use bot_config::{BotConfig, BotConfigRequest, Timestamp};
pub use page::{ApiEnvelope, PageParams, PageResponse};
