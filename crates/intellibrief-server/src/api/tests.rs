use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use intellibrief_db::MemoryBriefStore;
use intellibrief_signals::SignalCollector;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

fn app() -> Router {
    let collector = SignalCollector::simulated("intellibrief-test").expect("collector");
    build_app(AppState {
        store: Arc::new(MemoryBriefStore::new()),
        collector: Arc::new(collector),
        simulation_seed: Some(7),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn post_json(uri: &str, user: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_as(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).expect("request")
}

fn delete_as(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).expect("request")
}

async fn create(app: &Router, company: &str, user: Option<&str>) -> Value {
    let (status, json) = send(
        app,
        post_json(
            "/api/v1/briefs",
            user,
            &json!({ "companyName": company, "userIntent": "Reduce churn" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {json}");
    json["brief"].clone()
}

// ---------------------------------------------------------------------------
// Health and middleware
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok_for_memory_store() {
    let (status, json) = send(&app(), get_as("/api/v1/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok", "database": "ok" }));
}

#[tokio::test]
async fn response_echoes_request_id() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
}

#[test]
fn api_error_serializes_details_only_when_present() {
    let plain = serde_json::to_value(&ApiError::bad_request("bad").body).expect("serialize");
    assert_eq!(plain, json!({ "error": "bad" }));
    let detailed = ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "boom").with_details("why");
    assert_eq!(
        serde_json::to_value(&detailed.body).expect("serialize"),
        json!({ "error": "boom", "details": "why" })
    );
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_requires_company_and_intent() {
    let app = app();
    let (status, json) = send(
        &app,
        post_json("/api/v1/briefs", None, &json!({ "companyName": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Company name and user intent are required");

    let (status, _) = send(
        &app,
        post_json(
            "/api/v1/briefs",
            None,
            &json!({ "companyName": "  ", "userIntent": "sell" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/briefs")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, json) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn shopify_without_credentials_builds_a_full_brief() {
    let app = app();
    let (status, json) = send(
        &app,
        post_json(
            "/api/v1/briefs",
            Some("alice"),
            &json!({
                "companyName": "Shopify",
                "userIntent": "Improve merchant onboarding",
                "website": "https://www.shopify.com"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let brief = &json["brief"];
    assert_eq!(brief["userId"], "alice");
    assert_eq!(brief["news"].as_array().map(Vec::len), Some(2));
    assert_eq!(brief["jobSignals"].as_array().map(Vec::len), Some(5));
    assert_eq!(brief["stockData"]["ticker"], "SHOP");
    assert_eq!(
        brief["companyLogo"],
        "https://logo.clearbit.com/shopify.com"
    );

    let tech = brief["techStackData"].as_array().expect("tech array");
    assert!(tech.len() <= 10);
    let categories = ["Frontend", "Backend", "Language", "Cloud", "DevOps", "Database", "Other"];
    assert!(tech
        .iter()
        .all(|t| categories.contains(&t["category"].as_str().unwrap_or_default())));

    for field in ["summary", "pitchAngle", "subjectLine", "whatNotToPitch", "signalTag"] {
        let text = brief[field].as_str().expect("narrative field");
        assert!(!text.is_empty(), "{field} is empty");
        assert!(text.contains("Shopify"), "{field} lacks company: {text}");
    }

    let sources = &brief["intelligenceSources"];
    assert_eq!(sources["news"], 2);
    assert_eq!(sources["jobs"], 5);
    assert_eq!(sources["stockData"], true);
    assert_eq!(sources["simulated"]["news"], true);
    assert_eq!(sources["simulated"]["stock"], true);
}

#[tokio::test]
async fn body_user_id_overrides_header() {
    let app = app();
    let (status, json) = send(
        &app,
        post_json(
            "/api/v1/briefs",
            Some("header-user"),
            &json!({ "companyName": "Acme", "userIntent": "sell", "userId": "body-user" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["brief"]["userId"], "body-user");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_is_scoped_to_owner() {
    let app = app();
    let brief = create(&app, "Acme", Some("alice")).await;
    let uri = format!("/api/v1/briefs/{}", brief["id"].as_str().expect("id"));

    let (status, json) = send(&app, get_as(&uri, Some("alice"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["brief"]["companyName"], "Acme");

    let (status, json) = send(&app, get_as(&uri, Some("bob"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Brief not found or access denied");

    let (status, _) = send(&app, get_as("/api/v1/briefs/not-a-uuid", Some("alice"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_only_callers_briefs_newest_first() {
    let app = app();
    create(&app, "First", Some("alice")).await;
    create(&app, "Other", Some("bob")).await;
    create(&app, "Second", Some("alice")).await;

    let (status, json) = send(&app, get_as("/api/v1/briefs", Some("alice"))).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json["briefs"]
        .as_array()
        .expect("briefs")
        .iter()
        .filter_map(|b| b["companyName"].as_str())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn export_csv_and_html() {
    let app = app();
    create(&app, "Acme", Some("alice")).await;

    let response = app
        .clone()
        .oneshot(get_as("/api/v1/briefs/export?format=csv", Some("alice")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let csv = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(csv.starts_with("Company Name,Website,Summary"));
    assert!(csv.contains("\"Acme\""));

    let response = app
        .clone()
        .oneshot(get_as("/api/v1/briefs/export?format=html", Some("alice")))
        .await
        .expect("response");
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("<h2>Acme</h2>"));

    let (status, _) = send(&app, get_as("/api/v1/briefs/export?format=pdf", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Improve and delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn improve_rewrites_narrative() {
    let app = app();
    let brief = create(&app, "Acme", Some("alice")).await;
    let id = brief["id"].as_str().expect("id");

    let (status, json) = send(
        &app,
        post_json(
            "/api/v1/briefs/improve",
            Some("alice"),
            &json!({ "briefId": id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        json["message"],
        "Brief improved with deeper insights and sharper positioning."
    );
    let improved = &json["brief"];
    assert_eq!(improved["id"], brief["id"]);
    assert_eq!(improved["subjectLine"], brief["subjectLine"]);
    assert_ne!(improved["summary"], brief["summary"]);
    assert_eq!(improved["news"], brief["news"]);
}

#[tokio::test]
async fn improve_validates_and_scopes() {
    let app = app();
    let (status, json) = send(
        &app,
        post_json("/api/v1/briefs/improve", None, &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Brief ID is required");

    let brief = create(&app, "Acme", Some("alice")).await;
    let id = brief["id"].clone();
    let (status, _) = send(
        &app,
        post_json(
            "/api/v1/briefs/improve",
            None,
            &json!({ "briefId": id, "userId": "bob" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_wrong_owner_keeps_brief() {
    let app = app();
    let brief = create(&app, "Acme", Some("alice")).await;
    let uri = format!("/api/v1/briefs/{}", brief["id"].as_str().expect("id"));

    let (status, _) = send(&app, delete_as(&uri, Some("bob"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get_as(&uri, Some("alice"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, delete_as(&uri, Some("alice"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "success": true }));
    let (status, _) = send(&app, get_as(&uri, Some("alice"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
