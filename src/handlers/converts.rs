//! Convert handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::handlers::AppState;
use crate::models::convert::{Convert, CreateConvertRequest, UpdateConvertRequest};
use crate::pipeline::FollowUpStage;
use crate::services::AuthContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct ConvertListQuery {
    pub search: Option<String>,
    pub stage: Option<FollowUpStage>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /api/admin/converts`
pub async fn list(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<ConvertListQuery>,
) -> Result<Json<Vec<Convert>>> {
    let converts = state
        .services
        .convert_service
        .list(
            context.church_id,
            query.search.as_deref(),
            query.stage,
            query.limit,
            query.offset,
        )
        .await?;
    Ok(Json(converts))
}

/// `POST /api/admin/converts`
pub async fn create(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateConvertRequest>,
) -> Result<(StatusCode, Json<Convert>)> {
    let convert = state
        .services
        .convert_service
        .create(context.church_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(convert)))
}

/// `GET /api/admin/converts/:id`
pub async fn get(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Convert>> {
    let convert = state.services.convert_service.get(context.church_id, id).await?;
    Ok(Json(convert))
}

/// `POST /api/admin/converts/:id`
pub async fn update(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateConvertRequest>,
) -> Result<Json<Convert>> {
    let convert = state
        .services
        .convert_service
        .update(context.church_id, id, request)
        .await?;
    Ok(Json(convert))
}

/// `DELETE /api/admin/converts/:id`
pub async fn remove(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.services.convert_service.delete(context.church_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
