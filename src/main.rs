//! FlockKeeper Ministry API
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use FlockKeeper::{
    config::Settings,
    database::connection::{create_pool, run_migrations, DatabaseConfig},
    handlers::{build_router, AppState},
    i18n::I18n,
    middleware::{RateLimitConfig, RateLimitMiddleware},
    services::ServiceFactory,
    utils::logging,
};

/// How often the scheduled-announcement dispatcher wakes up
const DISPATCH_TICK: Duration = Duration::from_secs(60);

/// How often stale rate-limit entries are dropped
const RATE_LIMIT_CLEANUP_TICK: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the server
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting FlockKeeper Ministry API...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: Duration::from_secs(30),
        idle_timeout: Some(Duration::from_secs(600)),
        max_lifetime: Some(Duration::from_secs(1800)),
    };
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize i18n system
    info!("Loading translations...");
    let mut i18n = I18n::new(&settings.i18n);
    i18n.load_translations().await?;
    let i18n = Arc::new(i18n);

    // Initialize services
    info!("Initializing services...");
    let services = Arc::new(ServiceFactory::new(
        settings.clone(),
        db_pool.clone(),
        i18n,
    )?);

    let rate_limiter = RateLimitMiddleware::new(RateLimitConfig {
        max_requests: settings.server.rate_limit_per_minute,
        window_duration: Duration::from_secs(60),
        burst_allowance: settings.server.rate_limit_burst,
    });

    let state = AppState {
        services: services.clone(),
        settings: settings.clone(),
        rate_limiter: rate_limiter.clone(),
    };

    // Background task: dispatch scheduled announcements
    if settings.features.scheduled_dispatch {
        let dispatch_services = services.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(DISPATCH_TICK);
            loop {
                interval.tick().await;
                match dispatch_services
                    .announcement_service
                    .run_scheduled_dispatch()
                    .await
                {
                    Ok(0) => {}
                    Ok(count) => info!(count = count, "Dispatched scheduled announcements"),
                    Err(e) => error!(error = %e, "Scheduled announcement dispatch failed"),
                }
            }
        });
    } else {
        warn!("Scheduled announcement dispatch is disabled by configuration");
    }

    // Background task: drop stale rate-limit entries
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_TICK);
        loop {
            interval.tick().await;
            rate_limiter.cleanup_old_entries();
        }
    });

    // Build the router and serve
    let router = build_router(state);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("FlockKeeper is listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("FlockKeeper has been shut down.");

    Ok(())
}

/// Resolve when the process receives a termination signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install shutdown signal handler");
        return;
    }
    info!("Shutdown signal received");
}
