//! Internationalization module
//!
//! This module handles multi-language support for the console.
//! It provides bundled translation tables, optional on-disk overrides,
//! locale detection and message formatting.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams};
