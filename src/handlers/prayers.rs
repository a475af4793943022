//! Prayer request handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::handlers::AppState;
use crate::models::prayer::{CreatePrayerRequest, PrayerRequest, UpdatePrayerRequest};
use crate::services::AuthContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct PrayerListQuery {
    pub answered: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<PrayerListQuery>,
) -> Result<Json<Vec<PrayerRequest>>> {
    let prayers = state
        .services
        .prayer_service
        .list(context.church_id, query.answered, query.limit, query.offset)
        .await?;
    Ok(Json(prayers))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreatePrayerRequest>,
) -> Result<(StatusCode, Json<PrayerRequest>)> {
    let prayer = state.services.prayer_service.create(context.church_id, request).await?;
    Ok((StatusCode::CREATED, Json(prayer)))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<PrayerRequest>> {
    let prayer = state.services.prayer_service.get(context.church_id, id).await?;
    Ok(Json(prayer))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePrayerRequest>,
) -> Result<Json<PrayerRequest>> {
    let prayer = state
        .services
        .prayer_service
        .update(context.church_id, id, request)
        .await?;
    Ok(Json(prayer))
}

/// `POST /api/admin/prayer-requests/:id/answered`
pub async fn mark_answered(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<PrayerRequest>> {
    let prayer = state.services.prayer_service.mark_answered(context.church_id, id).await?;
    Ok(Json(prayer))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.services.prayer_service.delete(context.church_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
