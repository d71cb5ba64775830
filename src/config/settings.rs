//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Environment variable pointing at an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "WECHAT_BOT_CONSOLE_CONFIG";

/// Prefix for environment overrides, e.g. `WECHAT_BOT_CONSOLE__API__BASE_URL`
pub const ENV_PREFIX: &str = "WECHAT_BOT_CONSOLE";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub console: ConsoleConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

/// Bot config service connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Origin of the backend, e.g. `http://localhost:8080`
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// List view behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    pub default_page_size: u64,
    pub page_size_options: Vec<u64>,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    /// Directory of JSON files overriding the bundled translations
    pub translations_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_name: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Built-in defaults are overlaid by `config.toml` (or the file named by
    /// `WECHAT_BOT_CONSOLE_CONFIG`) and then by `WECHAT_BOT_CONSOLE__*`
    /// environment variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        let file = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::from_file(&file)
    }

    /// Load settings using a specific configuration file
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("console.page_size_options")
                    .with_list_parse_key("i18n.supported_languages")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ConsoleError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080".to_string(),
                timeout_seconds: 10,
                user_agent: format!("wechat-bot-console/{}", env!("CARGO_PKG_VERSION")),
            },
            console: ConsoleConfig {
                default_page_size: 10,
                page_size_options: vec![10, 20, 50, 100],
            },
            i18n: I18nConfig {
                default_language: "zh".to_string(),
                supported_languages: vec!["zh".to_string(), "en".to_string()],
                translations_dir: "translations".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
                file_name: "wechat-bot-console.log".to_string(),
            },
        }
    }
}
