//! Pipeline lookup handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::handlers::AppState;
use crate::models::checkin::PersonKind;
use crate::pipeline::StageInfo;
use crate::utils::errors::Result;

/// `GET /api/pipeline/:track`: the stage/label/color table the dashboard
/// renders badges from
pub async fn stage_table(
    State(state): State<AppState>,
    Path(track): Path<PersonKind>,
) -> Result<Json<Vec<StageInfo>>> {
    Ok(Json(state.services.pipeline.stage_table(track)))
}
