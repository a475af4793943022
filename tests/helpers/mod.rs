//! Shared test helpers

pub mod database_helper;
pub mod test_data;

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use FlockKeeper::config::Settings;
use FlockKeeper::handlers::AppState;
use FlockKeeper::i18n::I18n;
use FlockKeeper::middleware::{RateLimitConfig, RateLimitMiddleware};
use FlockKeeper::services::ServiceFactory;

/// Settings suitable for tests: long secret, delivery disabled, quiet logs
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
    settings.features.deliver_messages = false;
    settings
}

/// Application state backed by the given pool
pub fn test_state(pool: PgPool, settings: Settings) -> AppState {
    let i18n = Arc::new(I18n::new(&settings.i18n));
    let services =
        Arc::new(ServiceFactory::new(settings.clone(), pool, i18n).expect("service factory"));

    AppState {
        services,
        settings,
        rate_limiter: RateLimitMiddleware::new(RateLimitConfig {
            max_requests: 1000,
            window_duration: Duration::from_secs(60),
            burst_allowance: 100,
        }),
    }
}

/// A pool that never connects; good enough for routing and token tests that
/// stop before touching the database
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgresql://localhost:1/flockkeeper_unused")
        .expect("lazy pool")
}
