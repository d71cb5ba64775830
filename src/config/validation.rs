//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ConsoleError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_console_config(&settings.console)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot config service connection
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(ConsoleError::Config(
            "API base URL is required".to_string()
        ));
    }

    let parsed = url::Url::parse(&config.base_url)
        .map_err(|e| ConsoleError::Config(format!("Invalid API base URL '{}': {}", config.base_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConsoleError::Config(
            format!("API base URL must use http or https, got '{}'", parsed.scheme())
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ConsoleError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate list view configuration
fn validate_console_config(config: &super::ConsoleConfig) -> Result<()> {
    if config.page_size_options.is_empty() {
        return Err(ConsoleError::Config(
            "At least one page size option is required".to_string()
        ));
    }

    if config.page_size_options.contains(&0) {
        return Err(ConsoleError::Config(
            "Page size options must be greater than 0".to_string()
        ));
    }

    if !config.page_size_options.contains(&config.default_page_size) {
        return Err(ConsoleError::Config(
            "Default page size must be in page size options".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(ConsoleError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(ConsoleError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(ConsoleError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ConsoleError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ConsoleError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.file_name.is_empty() {
        return Err(ConsoleError::Config(
            "Log file name is required".to_string()
        ));
    }

    Ok(())
}
