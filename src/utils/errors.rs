//! Error handling for FlockKeeper
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy, including the mapping of
//! errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for the FlockKeeper application
#[derive(Error, Debug)]
pub enum FlockKeeperError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Message delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Convert not found: {id}")]
    ConvertNotFound { id: i64 },

    #[error("New member not found: {id}")]
    NewMemberNotFound { id: i64 },

    #[error("Announcement not found: {id}")]
    AnnouncementNotFound { id: i64 },

    #[error("{entity} not found: {id}")]
    RecordNotFound { entity: &'static str, id: i64 },

    #[error("Invalid stage transition: {from} -> {to}")]
    InvalidStageTransition { from: String, to: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Outbound messaging gateway specific errors
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Gateway request failed: {0}")]
    RequestFailed(String),

    #[error("Gateway timeout")]
    Timeout,

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    #[error("Gateway unavailable")]
    GatewayUnavailable,

    #[error("Recipient has no usable address for channel {0}")]
    MissingAddress(String),
}

/// Result type alias for FlockKeeper operations
pub type Result<T> = std::result::Result<T, FlockKeeperError>;

/// Result type alias for gateway operations
pub type DeliveryResult<T> = std::result::Result<T, DeliveryError>;

impl FlockKeeperError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            FlockKeeperError::ConvertNotFound { .. }
            | FlockKeeperError::NewMemberNotFound { .. }
            | FlockKeeperError::AnnouncementNotFound { .. }
            | FlockKeeperError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            FlockKeeperError::InvalidInput(_)
            | FlockKeeperError::Validation { .. }
            | FlockKeeperError::InvalidStageTransition { .. }
            | FlockKeeperError::UrlParse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FlockKeeperError::Authentication(_) | FlockKeeperError::Token(_) => {
                StatusCode::UNAUTHORIZED
            }
            FlockKeeperError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            FlockKeeperError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            FlockKeeperError::Delivery(_) | FlockKeeperError::ServiceUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FlockKeeperError::Database(_) => ErrorSeverity::Critical,
            FlockKeeperError::Migration(_) => ErrorSeverity::Critical,
            FlockKeeperError::Config(_) => ErrorSeverity::Critical,
            FlockKeeperError::PermissionDenied(_) => ErrorSeverity::Warning,
            FlockKeeperError::Authentication(_) | FlockKeeperError::Token(_) => {
                ErrorSeverity::Warning
            }
            FlockKeeperError::RateLimitExceeded => ErrorSeverity::Warning,
            FlockKeeperError::InvalidInput(_) | FlockKeeperError::Validation { .. } => {
                ErrorSeverity::Info
            }
            FlockKeeperError::ConvertNotFound { .. }
            | FlockKeeperError::NewMemberNotFound { .. }
            | FlockKeeperError::AnnouncementNotFound { .. }
            | FlockKeeperError::RecordNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Field name for validation errors, used by the dashboard to surface
    /// errors inline next to the offending form input.
    fn field(&self) -> Option<&str> {
        match self {
            FlockKeeperError::Validation { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

impl IntoResponse for FlockKeeperError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(status = %status, error = %message, "Request failed");
            }
            ErrorSeverity::Warning => {
                tracing::warn!(status = %status, error = %message, "Request rejected");
            }
            ErrorSeverity::Info => {
                tracing::debug!(status = %status, error = %message, "Request rejected");
            }
        }

        let body = serde_json::json!({
            "error": message,
            "field": self.field(),
        });

        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            FlockKeeperError::ConvertNotFound { id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            FlockKeeperError::Validation {
                field: "email".to_string(),
                message: "invalid email address".to_string(),
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            FlockKeeperError::Authentication("bad token".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            FlockKeeperError::PermissionDenied("admin only".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            FlockKeeperError::RateLimitExceeded.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            FlockKeeperError::Delivery(DeliveryError::Timeout).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_validation_error_exposes_field() {
        let err = FlockKeeperError::Validation {
            field: "phone".to_string(),
            message: "phone number is required for SMS".to_string(),
        };
        assert_eq!(err.field(), Some("phone"));
        assert!(err.to_string().contains("phone"));

        let err = FlockKeeperError::RateLimitExceeded;
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_severity_levels() {
        let err = FlockKeeperError::Config("missing database url".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(
            FlockKeeperError::RateLimitExceeded.severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            FlockKeeperError::InvalidInput("bad".to_string()).severity(),
            ErrorSeverity::Info
        );
    }
}
