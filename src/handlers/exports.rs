//! Export handlers
//!
//! Spreadsheet-compatible CSV downloads for the dashboard's export buttons.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Extension;

use crate::handlers::AppState;
use crate::services::AuthContext;
use crate::utils::errors::{FlockKeeperError, Result};

/// `GET /api/admin/exports/:entity`: download one entity table as CSV
pub async fn download(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(entity): Path<String>,
) -> Result<impl IntoResponse> {
    let services = &state.services;

    let csv = match entity.as_str() {
        "converts" => {
            let rows = services.convert_service.list_all(context.church_id).await?;
            services.export_service.converts_csv(&rows)
        }
        "new-members" => {
            let rows = services.new_member_service.list_all(context.church_id).await?;
            services.export_service.new_members_csv(&rows)
        }
        "members" => {
            let rows = services.directory_service.list_all_members(context.church_id).await?;
            services.export_service.members_csv(&rows)
        }
        "guests" => {
            let rows = services.directory_service.list_all_guests(context.church_id).await?;
            services.export_service.guests_csv(&rows)
        }
        other => {
            return Err(FlockKeeperError::InvalidInput(format!(
                "Unknown export entity: {}",
                other
            )));
        }
    };

    let slug = services
        .db
        .churches
        .find_by_id(context.church_id)
        .await?
        .map(|church| church.slug)
        .unwrap_or_else(|| "church".to_string());
    let filename = services.export_service.filename(&slug, &entity);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
