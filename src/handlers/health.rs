//! Health and statistics handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

use crate::handlers::AppState;
use crate::services::AuthContext;
use crate::utils::errors::Result;

/// Liveness endpoint with a service health summary
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.services.health_check().await;
    let healthy = health.is_healthy();
    let issues = health.get_issues();
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = serde_json::json!({
        "status": if healthy { "ok" } else { "degraded" },
        "service": "flockkeeper",
        "details": health,
        "issues": issues,
    });

    (status, Json(body))
}

/// Per-entity record counts for the admin dashboard
pub async fn church_stats(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>> {
    let stats = state.services.db.get_church_stats(context.church_id).await?;
    Ok(Json(stats))
}
