//! Integration tests for the live collectors using wiremock HTTP mocks.

use chrono::Utc;
use intellibrief_core::Sentiment;
use intellibrief_signals::{DataSource, JobsCollector, NewsCollector, ToneCollector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UA: &str = "intellibrief-test/0.1";

fn live() -> DataSource {
    DataSource::from_key(Some("test-key"))
}

#[tokio::test]
async fn news_maps_results_and_derives_favicon() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "success",
        "results": [
            {
                "title": "Acme raises Series C",
                "description": "Funding news",
                "link": "https://news.example/acme",
                "pubDate": "2026-02-01 09:00:00",
                "source_id": "techwire"
            },
            {
                "title": null,
                "link": "https://news.example/untitled",
                "source_id": "techwire"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("q", "Acme"))
        .and(query_param("language", "en"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let collector = NewsCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let news = collector.collect("Acme", &mut rng, Utc::now()).await;

    assert!(!news.simulated);
    assert_eq!(news.data.len(), 1);
    let item = &news.data[0];
    assert_eq!(item.title, "Acme raises Series C");
    assert_eq!(item.url, "https://news.example/acme");
    assert_eq!(item.source, "techwire");
    assert_eq!(
        item.source_favicon.as_deref(),
        Some("https://www.google.com/s2/favicons?domain=techwire")
    );
}

#[tokio::test]
async fn news_server_error_falls_back_to_simulated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let collector = NewsCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let news = collector.collect("Acme", &mut rng, Utc::now()).await;

    assert!(news.simulated);
    assert_eq!(news.data.len(), 2);
}

#[tokio::test]
async fn news_malformed_body_falls_back_to_simulated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let collector = NewsCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let news = collector.collect("Acme", &mut rng, Utc::now()).await;

    assert!(news.simulated);
}

#[tokio::test]
async fn simulated_news_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let collector =
        NewsCollector::with_base_url(DataSource::Simulated, UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let news = collector.collect("Acme", &mut rng, Utc::now()).await;

    assert!(news.simulated);
    assert_eq!(news.data.len(), 2);
}

#[tokio::test]
async fn jobs_send_rapidapi_headers_and_map_postings() {
    let server = MockServer::start().await;

    let long_description = "d".repeat(300);
    let body = serde_json::json!({
        "status": "OK",
        "data": [
            {
                "job_title": "Staff Engineer",
                "employer_name": "Acme Inc",
                "job_city": "Austin",
                "job_state": "TX",
                "job_posted_at_datetime_utc": "2026-02-02T00:00:00.000Z",
                "job_description": long_description,
                "job_min_salary": 150000,
                "job_max_salary": 210000
            },
            {
                "job_title": "Account Executive",
                "employer_name": "Acme Inc",
                "job_city": null,
                "job_state": null,
                "job_description": "Sell things"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "Acme"))
        .and(query_param("page", "1"))
        .and(query_param("num_pages", "1"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "jsearch.p.rapidapi.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let collector = JobsCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let jobs = collector.collect("Acme", &mut rng, Utc::now()).await;

    assert!(!jobs.simulated);
    assert_eq!(jobs.data.len(), 2);

    let staff = &jobs.data[0];
    assert_eq!(staff.location, "Austin, TX");
    assert_eq!(staff.salary.as_deref(), Some("$150,000 - $210,000"));
    assert_eq!(staff.description.chars().count(), 203);

    let ae = &jobs.data[1];
    assert_eq!(ae.location, "Remote");
    assert!(ae.salary.is_none());
}

#[tokio::test]
async fn jobs_cap_at_ten_postings() {
    let server = MockServer::start().await;

    let postings: Vec<serde_json::Value> = (0..15)
        .map(|i| serde_json::json!({ "job_title": format!("Role {i}") }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": postings })),
        )
        .mount(&server)
        .await;

    let collector = JobsCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let jobs = collector.collect("Acme", &mut rng, Utc::now()).await;

    assert_eq!(jobs.data.len(), 10);
}

#[tokio::test]
async fn jobs_unauthorized_falls_back_to_mock_roles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let collector = JobsCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let jobs = collector.collect("Acme", &mut rng, Utc::now()).await;

    assert!(jobs.simulated);
    assert_eq!(jobs.data.len(), 5);
}

#[tokio::test]
async fn tone_posts_form_encoded_text() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "emotions_detected": ["fear"],
        "emotion_scores": { "fear": 0.6, "sadness": 0.2, "joy": 0.1 },
        "result_code": "200"
    });

    Mock::given(method("POST"))
        .and(path("/analyze/"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("text=cut%20costs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let collector = ToneCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let tone = collector.collect("Acme", "cut costs", &[], &mut rng).await;

    assert!(!tone.simulated);
    assert_eq!(tone.data.emotion.as_deref(), Some("fear"));
    assert_eq!(tone.data.sentiment, Some(Sentiment::Negative));
    assert_eq!(tone.data.emotions.len(), 3);
    assert_eq!(tone.data.emotions[0].name, "fear");
}

#[tokio::test]
async fn tone_with_unrecognised_sentiment_stays_live() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "emotions_detected": ["joy"],
        "emotion_scores": { "joy": 0.8, "surprise": 0.3 },
        "sentiment": "mixed",
        "result_code": "200"
    });

    Mock::given(method("POST"))
        .and(path("/analyze/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let collector = ToneCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let tone = collector.collect("Acme", "grow revenue", &[], &mut rng).await;

    assert!(!tone.simulated);
    assert_eq!(tone.data.emotion.as_deref(), Some("joy"));
    assert_eq!(tone.data.confidence, Some(0.8));
    assert_eq!(tone.data.sentiment, Some(Sentiment::Positive));
    assert_eq!(tone.data.emotions.len(), 2);
}

#[tokio::test]
async fn tone_failure_uses_fallback_distribution() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let collector = ToneCollector::with_base_url(live(), UA, &server.uri()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let tone = collector.collect("Acme", "cut costs", &[], &mut rng).await;

    assert!(tone.simulated);
    assert_eq!(tone.data.emotions.len(), 6);
    let dominant = tone.data.emotion.clone().unwrap();
    let top = tone
        .data
        .emotions
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .unwrap();
    assert_eq!(top.name, dominant);
}
