//! Announcement handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::handlers::AppState;
use crate::models::announcement::{
    Announcement, AnnouncementStatus, CreateAnnouncementRequest, DispatchReport,
    ScheduleAnnouncementRequest, SendAnnouncementRequest,
};
use crate::services::AuthContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct AnnouncementListQuery {
    pub status: Option<AnnouncementStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /api/announcements`
pub async fn list(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<AnnouncementListQuery>,
) -> Result<Json<Vec<Announcement>>> {
    let announcements = state
        .services
        .announcement_service
        .list(context.church_id, query.status, query.limit, query.offset)
        .await?;
    Ok(Json(announcements))
}

/// `POST /api/announcements`: create a draft
pub async fn create(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>)> {
    let announcement = state
        .services
        .announcement_service
        .create_draft(context.church_id, context.leader_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// `GET /api/announcements/:id`
pub async fn get(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Announcement>> {
    let announcement = state
        .services
        .announcement_service
        .get(context.church_id, id)
        .await?;
    Ok(Json(announcement))
}

/// `POST /api/announcements/send`: dispatch immediately
pub async fn send(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<SendAnnouncementRequest>,
) -> Result<Json<DispatchReport>> {
    let report = state
        .services
        .announcement_service
        .send_now(context.church_id, context.leader_id, request)
        .await?;
    Ok(Json(report))
}

/// `POST /api/announcements/schedule`: dispatch at a future time
pub async fn schedule(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<ScheduleAnnouncementRequest>,
) -> Result<Json<Announcement>> {
    let announcement = state
        .services
        .announcement_service
        .schedule(context.church_id, context.leader_id, request)
        .await?;
    Ok(Json(announcement))
}

/// `DELETE /api/announcements/:id`
pub async fn remove(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state
        .services
        .announcement_service
        .delete(context.church_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
