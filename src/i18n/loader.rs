//! Translation loader and i18n management
//!
//! This module provides the core internationalization functionality including
//! translation loading, caching, and message formatting. Outbound messages
//! (announcement templates, follow-up reminders) are localized per church.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::config::I18nConfig;
use crate::utils::errors::{FlockKeeperError, Result};

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by language code
    translations: HashMap<String, Map<String, Value>>,
    /// Default language code
    default_language: String,
    /// Supported language codes
    supported_languages: Vec<String>,
    /// Directory containing `{lang}.json` files
    translations_dir: PathBuf,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create a new I18n instance
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_language: config.default_language.clone(),
            supported_languages: config.supported_languages.clone(),
            translations_dir: PathBuf::from(&config.translations_dir),
        }
    }

    /// Load all translation files from the translations directory
    pub async fn load_translations(&mut self) -> Result<()> {
        if !self.translations_dir.exists() {
            warn!("Translations directory not found, creating it");
            fs::create_dir_all(&self.translations_dir).await?;
        }

        let supported_languages = self.supported_languages.clone();
        for lang_code in &supported_languages {
            let file_path = self.translations_dir.join(format!("{}.json", lang_code));

            if file_path.exists() {
                match self.load_language_file(&file_path, lang_code).await {
                    Ok(_) => info!("Loaded translations for language: {}", lang_code),
                    Err(e) => {
                        error!("Failed to load translations for {}: {}", lang_code, e);
                        if lang_code == &self.default_language {
                            return Err(FlockKeeperError::Config(format!(
                                "Failed to load default language translations: {}",
                                e
                            )));
                        }
                    }
                }
            } else {
                warn!("Translation file not found: {}", file_path.display());
                if lang_code == &self.default_language {
                    return Err(FlockKeeperError::Config(format!(
                        "Default language translation file not found: {}",
                        file_path.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Load a single language file
    async fn load_language_file(&mut self, file_path: &Path, lang_code: &str) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        let translations: Value = serde_json::from_str(&content)?;

        if let Value::Object(map) = translations {
            debug!("Loaded {} translation keys for {}", map.len(), lang_code);
            self.translations.insert(lang_code.to_string(), map);
        } else {
            return Err(FlockKeeperError::Config(format!(
                "Invalid translation file format for {}",
                lang_code
            )));
        }

        Ok(())
    }

    /// Get a translated message
    pub fn t(&self, key: &str, lang: &str, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.get_effective_language(lang);

        match self.get_translation_value(key, &effective_lang) {
            Some(text) => self.format_message(&text, params),
            None => {
                // Fallback to default language if not found
                if effective_lang != self.default_language {
                    match self.get_translation_value(key, &self.default_language) {
                        Some(text) => self.format_message(&text, params),
                        None => {
                            warn!("Translation key '{}' not found in any language", key);
                            key.to_string()
                        }
                    }
                } else {
                    warn!("Translation key '{}' not found in default language", key);
                    key.to_string()
                }
            }
        }
    }

    /// Resolve a (possibly dotted) key within a language
    fn get_translation_value(&self, key: &str, lang: &str) -> Option<String> {
        let map = self.translations.get(lang)?;

        let mut current: &Value = map.get(key.split('.').next()?)?;
        for part in key.split('.').skip(1) {
            current = current.get(part)?;
        }

        match current {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Fall back to the default language for unsupported codes
    fn get_effective_language(&self, lang: &str) -> String {
        if self.supported_languages.iter().any(|l| l == lang) {
            lang.to_string()
        } else {
            self.default_language.clone()
        }
    }

    /// Replace `{param}` placeholders in a message
    fn format_message(&self, text: &str, params: Option<&TranslationParams>) -> String {
        let Some(params) = params else {
            return text.to_string();
        };

        let mut formatted = text.to_string();
        for (key, value) in params {
            let placeholder = format!("{{{}}}", key);
            formatted = formatted.replace(&placeholder, value);
        }
        formatted
    }

    /// Languages with loaded translations
    pub fn loaded_languages(&self) -> Vec<String> {
        self.translations.keys().cloned().collect()
    }

    /// Default language code
    pub fn default_language(&self) -> &str {
        &self.default_language
    }
}
