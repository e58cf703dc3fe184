use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use intellibrief_narrative::ExportFormat;

use super::{parse_brief_id, BriefListResponse, BriefResponse, ExportParams};
use crate::api::{map_db_error, ApiError, AppState, NOT_FOUND_MESSAGE};
use crate::middleware::Caller;

pub(in crate::api) async fn list_briefs(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<BriefListResponse>, ApiError> {
    let briefs = state
        .store
        .list(caller.0.as_ref())
        .await
        .map_err(|e| map_db_error(&e, "Failed to load briefs"))?;

    Ok(Json(BriefListResponse {
        success: true,
        briefs,
    }))
}

pub(in crate::api) async fn get_brief(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<BriefResponse>, ApiError> {
    let id = parse_brief_id(&id)?;
    let brief = state
        .store
        .get(id, caller.0.as_ref())
        .await
        .map_err(|e| map_db_error(&e, "Failed to load brief"))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MESSAGE))?;

    Ok(Json(BriefResponse {
        success: true,
        brief,
    }))
}

/// `GET /api/v1/briefs/export?format=csv|html`. Defaults to CSV.
pub(in crate::api) async fn export_briefs(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ExportParams>,
) -> Result<Response, ApiError> {
    let format = match params.format.as_deref() {
        None => ExportFormat::Csv,
        Some(raw) => ExportFormat::parse(raw)
            .ok_or_else(|| ApiError::bad_request(format!("Unsupported export format: {raw}")))?,
    };

    let briefs = state
        .store
        .list(caller.0.as_ref())
        .await
        .map_err(|e| map_db_error(&e, "Failed to load briefs"))?;
    let body = format.render(&briefs, Utc::now().date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}
