//! Rate limiting middleware
//!
//! This module provides rate limiting to prevent abuse and ensure fair usage
//! of the API. Requests are tracked per client in a sliding window with a
//! small burst allowance on top.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::handlers::AppState;
use crate::utils::errors::{FlockKeeperError, Result};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window_duration: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst_allowance: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 120,
            window_duration: Duration::from_secs(60),
            burst_allowance: 20,
        }
    }
}

/// Rate limit entry for tracking a client's requests
#[derive(Debug, Clone)]
struct RateLimitEntry {
    requests: Vec<Instant>,
    burst_used: u32,
    last_reset: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            burst_used: 0,
            last_reset: Instant::now(),
        }
    }

    /// Clean up old requests outside the window
    fn cleanup(&mut self, window_duration: Duration) {
        let cutoff = Instant::now() - window_duration;
        self.requests.retain(|&time| time > cutoff);

        if self.last_reset.elapsed() > window_duration {
            self.burst_used = 0;
            self.last_reset = Instant::now();
        }
    }

    /// Check if a request is allowed
    fn is_allowed(&mut self, config: &RateLimitConfig) -> bool {
        self.cleanup(config.window_duration);

        let current_requests = self.requests.len() as u32;

        if current_requests < config.max_requests {
            return true;
        }

        if self.burst_used < config.burst_allowance {
            self.burst_used += 1;
            return true;
        }

        false
    }

    /// Record a new request
    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }
}

/// Rate limiting middleware state
#[derive(Clone)]
pub struct RateLimitMiddleware {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

impl RateLimitMiddleware {
    /// Create a new RateLimitMiddleware instance
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a client is rate limited
    pub fn check_rate_limit(&self, client_key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(client_key.to_string())
            .or_insert_with(RateLimitEntry::new);

        if entry.is_allowed(&self.config) {
            entry.record_request();
            debug!(client = client_key, "Rate limit check passed");
            Ok(())
        } else {
            warn!(client = client_key, "Rate limit exceeded");
            Err(FlockKeeperError::RateLimitExceeded)
        }
    }

    /// Cleanup old entries (called periodically from the maintenance task)
    pub fn cleanup_old_entries(&self) {
        let mut entries = self.entries.lock().unwrap();
        let cutoff = Instant::now() - self.config.window_duration * 2;

        entries.retain(|_, entry| entry.requests.iter().any(|&time| time > cutoff));

        debug!(remaining_entries = entries.len(), "Cleaned up old rate limit entries");
    }
}

impl Default for RateLimitMiddleware {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

/// Identify the client behind a request. Proxied deployments pass the
/// original address in X-Forwarded-For.
fn client_key(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| "local".to_string())
}

/// Axum middleware applying the rate limit per client
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let key = client_key(&request);
    state.rate_limiter.check_rate_limit(&key)?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_basic() {
        let config = RateLimitConfig {
            max_requests: 3,
            window_duration: Duration::from_secs(60),
            burst_allowance: 1,
        };

        let middleware = RateLimitMiddleware::new(config);

        // First 3 requests should pass
        assert!(middleware.check_rate_limit("10.0.0.1").is_ok());
        assert!(middleware.check_rate_limit("10.0.0.1").is_ok());
        assert!(middleware.check_rate_limit("10.0.0.1").is_ok());

        // 4th request should use burst allowance
        assert!(middleware.check_rate_limit("10.0.0.1").is_ok());

        // 5th request should fail
        assert!(middleware.check_rate_limit("10.0.0.1").is_err());
    }

    #[test]
    fn test_clients_are_tracked_separately() {
        let config = RateLimitConfig {
            max_requests: 1,
            window_duration: Duration::from_secs(60),
            burst_allowance: 0,
        };

        let middleware = RateLimitMiddleware::new(config);

        assert!(middleware.check_rate_limit("10.0.0.1").is_ok());
        assert!(middleware.check_rate_limit("10.0.0.1").is_err());

        // A different client is unaffected
        assert!(middleware.check_rate_limit("10.0.0.2").is_ok());
    }

    #[test]
    fn test_cleanup_keeps_recent_entries() {
        let middleware = RateLimitMiddleware::default();

        middleware.check_rate_limit("10.0.0.1").unwrap();
        middleware.check_rate_limit("10.0.0.1").unwrap();

        middleware.cleanup_old_entries();
        let entries = middleware.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
    }
}
