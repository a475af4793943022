//! Member and guest directory handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::handlers::AppState;
use crate::models::guest::{CreateGuestRequest, Guest, UpdateGuestRequest};
use crate::models::member::{CreateMemberRequest, Member, UpdateMemberRequest};
use crate::services::AuthContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct DirectoryListQuery {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Members

pub async fn list_members(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<DirectoryListQuery>,
) -> Result<Json<Vec<Member>>> {
    let members = state
        .services
        .directory_service
        .list_members(context.church_id, query.search.as_deref(), query.limit, query.offset)
        .await?;
    Ok(Json(members))
}

pub async fn create_member(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<Member>)> {
    let member = state
        .services
        .directory_service
        .create_member(context.church_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn get_member(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Member>> {
    let member = state.services.directory_service.get_member(context.church_id, id).await?;
    Ok(Json(member))
}

pub async fn update_member(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<Member>> {
    let member = state
        .services
        .directory_service
        .update_member(context.church_id, id, request)
        .await?;
    Ok(Json(member))
}

pub async fn remove_member(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.services.directory_service.delete_member(context.church_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Guests

pub async fn list_guests(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<DirectoryListQuery>,
) -> Result<Json<Vec<Guest>>> {
    let guests = state
        .services
        .directory_service
        .list_guests(context.church_id, query.search.as_deref(), query.limit, query.offset)
        .await?;
    Ok(Json(guests))
}

pub async fn create_guest(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<Guest>)> {
    let guest = state
        .services
        .directory_service
        .create_guest(context.church_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

pub async fn get_guest(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Guest>> {
    let guest = state.services.directory_service.get_guest(context.church_id, id).await?;
    Ok(Json(guest))
}

pub async fn update_guest(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateGuestRequest>,
) -> Result<Json<Guest>> {
    let guest = state
        .services
        .directory_service
        .update_guest(context.church_id, id, request)
        .await?;
    Ok(Json(guest))
}

pub async fn remove_guest(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.services.directory_service.delete_guest(context.church_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
