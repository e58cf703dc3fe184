use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use chrono::Utc;
use intellibrief_narrative::{compose, improve, BriefRequest, IMPROVED_MESSAGE};

use super::{
    parse_brief_id, BriefResponse, CreateBriefBody, DeleteResponse, ImproveBriefBody,
    ImproveResponse,
};
use crate::api::{map_db_error, ApiError, AppState, NOT_FOUND_MESSAGE};
use crate::middleware::Caller;

const REQUIRED_FIELDS: &str = "Company name and user intent are required";
const BRIEF_ID_REQUIRED: &str = "Brief ID is required";

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub(in crate::api) async fn create_brief(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: Result<Json<CreateBriefBody>, JsonRejection>,
) -> Result<Json<BriefResponse>, ApiError> {
    let body = json_body(body)?;
    let owner = caller.or_body(body.user_id.as_deref());
    let request = BriefRequest::new(
        body.company_name.as_deref().unwrap_or_default(),
        body.user_intent.as_deref().unwrap_or_default(),
        body.website.as_deref(),
        body.user_company,
    )
    .ok_or_else(|| ApiError::bad_request(REQUIRED_FIELDS))?;

    let mut rng = state.rng();
    let bundle = state
        .collector
        .collect(
            &request.company_name,
            &request.user_intent,
            &mut rng,
            Utc::now(),
        )
        .await;

    let brief = state
        .store
        .create(compose(&request, bundle), owner.as_ref())
        .await
        .map_err(|e| map_db_error(&e, "Failed to save brief to database"))?;

    tracing::info!(
        brief_id = %brief.id,
        company = %brief.content.company_name,
        "brief created"
    );

    Ok(Json(BriefResponse {
        success: true,
        brief,
    }))
}

pub(in crate::api) async fn improve_brief(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: Result<Json<ImproveBriefBody>, JsonRejection>,
) -> Result<Json<ImproveResponse>, ApiError> {
    let body = json_body(body)?;
    let raw_id = body
        .brief_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request(BRIEF_ID_REQUIRED))?;
    let id = parse_brief_id(raw_id)?;
    let owner = caller.or_body(body.user_id.as_deref());

    let existing = state
        .store
        .get(id, owner.as_ref())
        .await
        .map_err(|e| map_db_error(&e, "Failed to update brief"))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MESSAGE))?;

    let brief = state
        .store
        .update(id, improve(&existing), owner.as_ref())
        .await
        .map_err(|e| map_db_error(&e, "Failed to update brief"))?;

    tracing::info!(brief_id = %brief.id, "brief improved");

    Ok(Json(ImproveResponse {
        success: true,
        brief,
        message: IMPROVED_MESSAGE,
    }))
}

pub(in crate::api) async fn delete_brief(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_brief_id(&id)?;
    state
        .store
        .delete(id, caller.0.as_ref())
        .await
        .map_err(|e| map_db_error(&e, "Failed to delete brief"))?;

    tracing::info!(brief_id = %id, "brief deleted");
    Ok(Json(DeleteResponse { success: true }))
}
