//! Shared helper functions
//!
//! Small validation and formatting utilities used across services and
//! handlers.

use regex::Regex;
use std::sync::OnceLock;

use crate::utils::errors::{FlockKeeperError, Result};

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Hard ceiling on page size
pub const MAX_PAGE_SIZE: i64 = 100;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
    })
}

/// Validate an email address, reporting the offending field by name
pub fn validate_email(field: &str, email: &str) -> Result<()> {
    if email_regex().is_match(email.trim()) {
        Ok(())
    } else {
        Err(FlockKeeperError::Validation {
            field: field.to_string(),
            message: format!("'{}' is not a valid email address", email),
        })
    }
}

/// Require a non-empty value for a named form field
pub fn require_field(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(FlockKeeperError::Validation {
            field: field.to_string(),
            message: "is required".to_string(),
        })
    } else {
        Ok(())
    }
}

/// Normalize a phone number to a dialable form: keep digits and a leading +.
///
/// Returns an error when fewer than 7 digits remain, which catches most
/// garbage input without attempting full E.164 validation.
pub fn normalize_phone(field: &str, phone: &str) -> Result<String> {
    let mut normalized = String::with_capacity(phone.len());
    for (i, c) in phone.trim().chars().enumerate() {
        if c.is_ascii_digit() {
            normalized.push(c);
        } else if c == '+' && i == 0 {
            normalized.push(c);
        }
    }

    let digit_count = normalized.chars().filter(|c| c.is_ascii_digit()).count();
    if digit_count < 7 {
        return Err(FlockKeeperError::Validation {
            field: field.to_string(),
            message: format!("'{}' is not a valid phone number", phone),
        });
    }

    Ok(normalized)
}

/// Slugify a church name for use in meeting links and export filenames
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Clamp pagination parameters to sane bounds
pub fn clamp_pagination(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "pastor@gracechapel.org").is_ok());
        assert!(validate_email("email", "maria.lopez+guest@mail.co").is_ok());
        assert!(validate_email("email", "not-an-email").is_err());
        assert!(validate_email("email", "missing@tld").is_err());
        assert!(validate_email("email", "").is_err());
    }

    #[test]
    fn test_validation_error_carries_field() {
        let err = validate_email("contact_email", "nope").unwrap_err();
        assert_matches!(err, FlockKeeperError::Validation { field, .. } if field == "contact_email");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("phone", "+1 (555) 867-5309").unwrap(), "+15558675309");
        assert_eq!(normalize_phone("phone", "555.867.5309").unwrap(), "5558675309");
        assert!(normalize_phone("phone", "867").is_err());
        assert!(normalize_phone("phone", "call me maybe").is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Grace Chapel"), "grace-chapel");
        assert_eq!(slugify("St. Mark's  Downtown"), "st-mark-s-downtown");
        assert_eq!(slugify("  Iglesia Vida!  "), "iglesia-vida");
    }

    #[test]
    fn test_clamp_pagination() {
        assert_eq!(clamp_pagination(None, None), (DEFAULT_PAGE_SIZE, 0));
        assert_eq!(clamp_pagination(Some(500), Some(-3)), (MAX_PAGE_SIZE, 0));
        assert_eq!(clamp_pagination(Some(10), Some(40)), (10, 40));
        assert_eq!(clamp_pagination(Some(0), None), (1, 0));
    }

    #[test]
    fn test_require_field() {
        assert!(require_field("first_name", "Ana").is_ok());
        assert!(require_field("first_name", "   ").is_err());
    }
}
