mod read;
mod write;

pub(super) use read::{export_briefs, get_brief, list_briefs};
pub(super) use write::{create_brief, delete_brief, improve_brief};

use intellibrief_core::{Brief, UserCompany};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ApiError, NOT_FOUND_MESSAGE};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/briefs`. Required fields are validated by hand so a
/// missing field yields the domain error message rather than a serde one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBriefBody {
    pub company_name: Option<String>,
    pub user_intent: Option<String>,
    pub website: Option<String>,
    pub user_id: Option<String>,
    pub user_company: Option<UserCompany>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImproveBriefBody {
    pub brief_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BriefResponse {
    pub success: bool,
    pub brief: Brief,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub success: bool,
    pub brief: Brief,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BriefListResponse {
    pub success: bool,
    pub briefs: Vec<Brief>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// An id that is not a UUID cannot name any brief, so it is a 404.
fn parse_brief_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::not_found(NOT_FOUND_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_tolerates_missing_fields() {
        let body: CreateBriefBody =
            serde_json::from_str(r#"{"companyName":"Acme"}"#).expect("parse");
        assert_eq!(body.company_name.as_deref(), Some("Acme"));
        assert!(body.user_intent.is_none());
        assert!(body.user_company.is_none());
    }

    #[test]
    fn create_body_reads_seller_company() {
        let body: CreateBriefBody = serde_json::from_str(
            r#"{"companyName":"Acme","userIntent":"sell","userCompany":
                {"name":"Beacon","product":"suite","valueProposition":"Unified telemetry"}}"#,
        )
        .expect("parse");
        let seller = body.user_company.expect("seller");
        assert_eq!(seller.name, "Beacon");
        assert_eq!(seller.value_proposition, "Unified telemetry");
    }

    #[test]
    fn malformed_brief_id_is_not_found() {
        let err = parse_brief_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
        assert!(parse_brief_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
