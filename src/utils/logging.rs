//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the FlockKeeper application.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard must be held for the lifetime of the process, otherwise
/// the file writer shuts down and log lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "flockkeeper.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log leader actions with structured data
pub fn log_leader_action(leader_id: i64, church_id: i64, action: &str, details: Option<&str>) {
    info!(
        leader_id = leader_id,
        church_id = church_id,
        action = action,
        details = details,
        "Leader action performed"
    );
}

/// Log follow-up pipeline movements
pub fn log_stage_change(person_kind: &str, person_id: i64, from: &str, to: &str) {
    info!(
        person_kind = person_kind,
        person_id = person_id,
        from = from,
        to = to,
        "Follow-up stage advanced"
    );
}

/// Log announcement dispatch results
pub fn log_announcement_dispatch(announcement_id: i64, sent: u32, failed: u32) {
    if failed > 0 {
        warn!(
            announcement_id = announcement_id,
            sent = sent,
            failed = failed,
            "Announcement dispatched with failures"
        );
    } else {
        info!(
            announcement_id = announcement_id,
            sent = sent,
            "Announcement dispatched"
        );
    }
}

/// Log outbound gateway calls
pub fn log_gateway_call(gateway: &str, recipient: &str, success: bool) {
    if success {
        debug!(gateway = gateway, recipient = recipient, "Gateway call succeeded");
    } else {
        warn!(gateway = gateway, recipient = recipient, "Gateway call failed");
    }
}
