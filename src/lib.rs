//! FlockKeeper Ministry API
//!
//! A ministry administration service for convert and new-member follow-up.
//! This library provides modular components for people management, the staged
//! follow-up pipeline, outbound announcements (email/SMS/MMS), prayer
//! requests, and record exports with multi-language support.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{FlockKeeperError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{build_router, AppState};
pub use i18n::I18n;
pub use pipeline::PipelineManager;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
