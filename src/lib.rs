//! WeChat-Work bot config console
//!
//! A terminal console for the callback configurations of WeChat-Work bots.
//! This library provides the client for the bot config service, the page
//! state machine behind the management screen, and the command handlers and
//! renderers of the interactive console, with multi-language support.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ConsoleError, Result};

// Re-export main components for easy access
pub use handlers::ConsoleSession;
pub use services::ServiceFactory;
pub use state::BotConfigPage;
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
