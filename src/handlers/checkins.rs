//! Checkin handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::handlers::AppState;
use crate::models::checkin::{Checkin, CreateCheckinRequest, PersonKind};
use crate::services::AuthContext;
use crate::utils::errors::Result;

/// `POST /api/checkins`: record a follow-up interaction
pub async fn create(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateCheckinRequest>,
) -> Result<(StatusCode, Json<Checkin>)> {
    let checkin = state
        .services
        .followup_service
        .record_checkin(context.church_id, context.leader_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(checkin)))
}

/// `GET /api/checkins/:kind/:id`: follow-up history for one person
pub async fn history(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path((kind, id)): Path<(PersonKind, i64)>,
) -> Result<Json<Vec<Checkin>>> {
    let checkins = state
        .services
        .followup_service
        .history(context.church_id, kind, id)
        .await?;
    Ok(Json(checkins))
}
