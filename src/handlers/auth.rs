//! Authentication handlers

use axum::extract::State;
use axum::Json;

use crate::handlers::AppState;
use crate::models::leader::{LoginRequest, LoginResponse};
use crate::utils::errors::Result;

/// `POST /api/auth/login`: exchange email + access code for a token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let response = state.services.auth_service.login(request).await?;
    Ok(Json(response))
}
