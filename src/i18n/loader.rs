//! Translation loader and i18n management
//!
//! This module provides the core internationalization functionality including
//! translation loading, language detection, and message formatting.
//! Translations for every supported language ship inside the binary; a
//! directory of JSON files can be layered on top to override them.

use std::collections::HashMap;
use std::path::Path;
use serde_json::{Value, Map};
use tokio::fs;
use tracing::{info, warn, debug};
use crate::utils::errors::{ConsoleError, Result};
use crate::config::I18nConfig;

const BUNDLED: &[(&str, &str)] = &[
    ("zh", include_str!("../../translations/zh.json")),
    ("en", include_str!("../../translations/en.json")),
];

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by language code
    translations: HashMap<String, Map<String, Value>>,
    /// Default language code
    default_language: String,
    /// Supported language codes
    supported_languages: Vec<String>,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create a new I18n instance with no translations loaded
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_language: config.default_language.clone(),
            supported_languages: config.supported_languages.clone(),
        }
    }

    /// Create an instance with the bundled translations loaded
    pub fn with_bundled(config: &I18nConfig) -> Result<Self> {
        let mut i18n = Self::new(config);
        i18n.load_bundled()?;
        Ok(i18n)
    }

    /// Load the translations compiled into the binary
    pub fn load_bundled(&mut self) -> Result<()> {
        for (lang_code, content) in BUNDLED {
            if self.is_language_supported(lang_code) {
                self.insert_language(lang_code, content)?;
            }
        }

        if !self.translations.contains_key(&self.default_language) {
            return Err(ConsoleError::Config(format!(
                "No bundled translations for default language: {}",
                self.default_language
            )));
        }

        Ok(())
    }

    /// Override translations with JSON files found in `dir`
    ///
    /// Missing files are skipped; a file that exists but fails to parse is an error.
    pub async fn load_translations_from(&mut self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            warn!("Translations directory not found: {}", dir.display());
            return Ok(());
        }

        let supported_languages = self.supported_languages.clone();
        for lang_code in &supported_languages {
            let file_path = dir.join(format!("{}.json", lang_code));

            if file_path.exists() {
                let content = fs::read_to_string(&file_path).await?;
                self.insert_language(lang_code, &content)?;
                info!("Loaded translations for language: {}", lang_code);
            } else {
                debug!("Translation file not found: {}", file_path.display());
            }
        }

        Ok(())
    }

    /// Parse and merge one language file
    fn insert_language(&mut self, lang_code: &str, content: &str) -> Result<()> {
        let translations: Value = serde_json::from_str(content)?;

        if let Value::Object(map) = translations {
            let entry = self.translations.entry(lang_code.to_string()).or_default();
            merge(entry, map);
            debug!("Loaded {} translation keys for {}", count_keys(entry), lang_code);
        } else {
            return Err(ConsoleError::Config(
                format!("Invalid translation file format for {}", lang_code)
            ));
        }

        Ok(())
    }

    /// Get a translated message
    pub fn t(&self, key: &str, lang: &str, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.get_effective_language(lang);

        let value = self
            .get_translation_value(key, &effective_lang)
            .or_else(|| self.get_translation_value(key, &self.default_language));

        match value {
            Some(translation) => self.format_message(&extract_text(translation), params),
            None => {
                warn!("Translation key '{}' not found in any language", key);
                key.to_string()
            }
        }
    }

    /// Shorthand for a message with a single placeholder
    pub fn t1(&self, key: &str, lang: &str, name: &str, value: impl ToString) -> String {
        let mut params = TranslationParams::new();
        params.insert(name.to_string(), value.to_string());
        self.t(key, lang, Some(&params))
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.supported_languages.iter().any(|l| l == lang)
    }

    /// Get the effective language (fallback to default if not supported)
    fn get_effective_language(&self, lang: &str) -> String {
        if self.is_language_supported(lang) && self.translations.contains_key(lang) {
            lang.to_string()
        } else {
            self.default_language.clone()
        }
    }

    /// Get translation value from nested JSON structure
    fn get_translation_value(&self, key: &str, lang: &str) -> Option<&Value> {
        let translations = self.translations.get(lang)?;

        // Nested keys like "form.bot_key.required"
        let mut parts = key.split('.');
        let mut current = translations.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }

        Some(current)
    }

    /// Format message with parameters
    fn format_message(&self, template: &str, params: Option<&TranslationParams>) -> String {
        if let Some(params) = params {
            let mut result = template.to_string();
            for (key, value) in params {
                let placeholder = format!("{{{}}}", key);
                result = result.replace(&placeholder, value);
            }
            result
        } else {
            template.to_string()
        }
    }

    /// Get supported languages
    pub fn supported_languages(&self) -> &[String] {
        &self.supported_languages
    }

    /// Get default language
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Detect the display language from a locale string such as `$LANG`
    pub fn detect_language(&self, locale: Option<&str>) -> String {
        if let Some(locale) = locale {
            // "en_US.UTF-8" -> "en", "zh-CN" -> "zh"
            let lang_code = locale
                .split(&['-', '_', '.'][..])
                .next()
                .unwrap_or(locale)
                .to_lowercase();

            if self.is_language_supported(&lang_code) {
                return lang_code;
            }
        }

        self.default_language.clone()
    }
}

fn extract_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

fn merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) = (target.get_mut(&key), &value) {
            merge(existing, incoming.clone());
            continue;
        }
        target.insert(key, value);
    }
}

/// Recursively count translation keys
fn count_keys(obj: &Map<String, Value>) -> usize {
    obj.values()
        .map(|value| match value {
            Value::Object(nested) => count_keys(nested),
            _ => 1,
        })
        .sum()
}
