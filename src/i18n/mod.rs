//! Internationalization module
//!
//! This module handles multi-language support for outbound messages and API
//! strings. It provides translation loading, language fallback, and message
//! formatting.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams};
