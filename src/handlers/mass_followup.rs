//! Mass follow-up handlers

use axum::extract::State;
use axum::{Extension, Json};

use crate::handlers::AppState;
use crate::models::checkin::{
    MassFollowUpCandidate, MassFollowUpCandidatesRequest, MassFollowUpReport,
    MassFollowUpScheduleRequest,
};
use crate::services::AuthContext;
use crate::utils::errors::Result;

/// `POST /api/mass-followup/candidates`: people eligible for a batch
pub async fn candidates(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<MassFollowUpCandidatesRequest>,
) -> Result<Json<Vec<MassFollowUpCandidate>>> {
    let candidates = state
        .services
        .followup_service
        .candidates(context.church_id, request)
        .await?;
    Ok(Json(candidates))
}

/// `POST /api/mass-followup/schedule`: schedule the same follow-up for all
/// selected people, returning a per-person report
pub async fn schedule(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<MassFollowUpScheduleRequest>,
) -> Result<Json<MassFollowUpReport>> {
    let report = state
        .services
        .followup_service
        .mass_schedule(context.church_id, context.leader_id, request)
        .await?;
    Ok(Json(report))
}
