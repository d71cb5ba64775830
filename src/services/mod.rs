//! Services module
//!
//! This module contains the clients and side-effect services the console page
//! depends on

pub mod bot_config;
pub mod clipboard;
pub mod notification;

// Re-export commonly used services
pub use bot_config::{BotConfigApi, BotConfigClient};
pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard};
pub use notification::{Notification, NotificationLevel, NotificationQueue};

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub api: Arc<dyn BotConfigApi>,
    pub clipboard: Arc<dyn Clipboard>,
}

impl ServiceFactory {
    /// Create the HTTP-backed services used by the terminal console
    pub fn new(settings: &Settings) -> Result<Self> {
        let api = BotConfigClient::new(&settings.api)?;

        Ok(Self {
            api: Arc::new(api),
            clipboard: Arc::new(Osc52Clipboard::new(std::io::stdout())),
        })
    }

    /// Assemble a factory from explicit parts
    pub fn from_parts(api: Arc<dyn BotConfigApi>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self { api, clipboard }
    }
}
