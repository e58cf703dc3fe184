mod briefs;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use intellibrief_db::{BriefStore, DbError};
use intellibrief_signals::SignalCollector;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{caller_identity, request_id, REQUEST_ID_HEADER, USER_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BriefStore>,
    pub collector: Arc<SignalCollector>,
    /// Fixed seed for simulated data; `None` seeds from the OS per request.
    pub simulation_seed: Option<u64>,
}

impl AppState {
    pub(crate) fn rng(&self) -> StdRng {
        match self.simulation_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.body.details = Some(details.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub(super) const NOT_FOUND_MESSAGE: &str = "Brief not found or access denied";

/// Maps a store failure to a response. `NotFound` becomes a 404; anything
/// else is logged and surfaced as a 500 with `message`.
pub(super) fn map_db_error(error: &DbError, message: &str) -> ApiError {
    match error {
        DbError::NotFound => ApiError::not_found(NOT_FOUND_MESSAGE),
        _ => {
            tracing::error!(error = %error, "{message}");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message).with_details(error.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderName::from_static(USER_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/briefs",
            get(briefs::list_briefs).post(briefs::create_brief),
        )
        .route("/api/v1/briefs/improve", post(briefs::improve_brief))
        .route("/api/v1/briefs/export", get(briefs::export_briefs))
        .route(
            "/api/v1/briefs/{id}",
            get(briefs::get_brief).delete(briefs::delete_brief),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn(caller_identity)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests;
