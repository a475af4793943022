//! New member handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::handlers::AppState;
use crate::models::leader::LeaderRole;
use crate::models::new_member::{CreateNewMemberRequest, NewMember, UpdateNewMemberRequest};
use crate::pipeline::FollowUpStage;
use crate::services::AuthContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct NewMemberListQuery {
    pub search: Option<String>,
    pub stage: Option<FollowUpStage>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /api/leader/new-members`: a leader sees their assigned new members,
/// an admin sees the whole track
pub async fn leader_list(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<Vec<NewMember>>> {
    let members = match context.role {
        LeaderRole::Admin => {
            state
                .services
                .new_member_service
                .list(context.church_id, None, None, None, None)
                .await?
        }
        LeaderRole::Leader => {
            state
                .services
                .new_member_service
                .list_for_leader(context.church_id, context.leader_id)
                .await?
        }
    };
    Ok(Json(members))
}

/// `GET /api/admin/new-members`
pub async fn list(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<NewMemberListQuery>,
) -> Result<Json<Vec<NewMember>>> {
    let members = state
        .services
        .new_member_service
        .list(
            context.church_id,
            query.search.as_deref(),
            query.stage,
            query.limit,
            query.offset,
        )
        .await?;
    Ok(Json(members))
}

/// `POST /api/admin/new-members`
pub async fn create(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateNewMemberRequest>,
) -> Result<(StatusCode, Json<NewMember>)> {
    let member = state
        .services
        .new_member_service
        .create(context.church_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// `GET /api/admin/new-members/:id`
pub async fn get(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<NewMember>> {
    let member = state.services.new_member_service.get(context.church_id, id).await?;
    Ok(Json(member))
}

/// `POST /api/admin/new-members/:id`
pub async fn update(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateNewMemberRequest>,
) -> Result<Json<NewMember>> {
    let member = state
        .services
        .new_member_service
        .update(context.church_id, id, request)
        .await?;
    Ok(Json(member))
}

/// `DELETE /api/admin/new-members/:id`
pub async fn remove(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.services.new_member_service.delete(context.church_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
