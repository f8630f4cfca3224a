use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use recommendation_service::api::{create_router, AppState};
use recommendation_service::metrics::MetricsSink;
use recommendation_service::models::{RecommendResponse, RecommendationMetrics};

fn create_test_server() -> TestServer {
    let app = create_router(AppState::default());
    TestServer::new(app).unwrap()
}

/// Keeps every record so tests can inspect what the handler reported
#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<RecommendationMetrics>>,
}

impl MetricsSink for RecordingSink {
    fn record(&self, metrics: &RecommendationMetrics) {
        self.records.lock().unwrap().push(*metrics);
    }
}

fn sample_body() -> serde_json::Value {
    json!({
        "play_counts": { "A": 10, "B": 30, "C": 20, "D": 5, "E": 1, "F": 7 },
        "user_stats": [
            { "user_id": "u1", "top_artist": "B" },
            { "user_id": "u2", "top_artist": "" }
        ]
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_recommend_sample_scenario() {
    let server = create_test_server();

    let response = server.post("/recommend").json(&sample_body()).await;

    response.assert_status_ok();
    let body: RecommendResponse = response.json();
    assert_eq!(body.trending_songs, vec!["B", "C", "A", "F", "D"]);
    assert_eq!(body.recommendations["u1"], vec!["C", "A", "F", "D"]);
    assert!(body.recommendations["u2"].is_empty());
    assert!(body.processing_time >= 0.0);
}

#[tokio::test]
async fn test_versioned_route() {
    let server = create_test_server();

    let response = server.post("/api/v1/recommend").json(&sample_body()).await;

    response.assert_status_ok();
    let body: RecommendResponse = response.json();
    assert_eq!(body.trending_songs.len(), 5);
}

#[tokio::test]
async fn test_empty_play_counts() {
    let server = create_test_server();

    let response = server
        .post("/recommend")
        .json(&json!({
            "play_counts": {},
            "user_stats": [{ "user_id": "solo", "top_artist": "Queen" }]
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["trending_songs"], json!([]));
    assert_eq!(body["recommendations"], json!({ "solo": [] }));
}

#[tokio::test]
async fn test_missing_fields_default_to_empty() {
    let server = create_test_server();

    let response = server.post("/recommend").json(&json!({})).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["trending_songs"], json!([]));
    assert_eq!(body["recommendations"], json!({}));
}

#[tokio::test]
async fn test_ties_follow_request_order() {
    let server = create_test_server();

    // Raw body: a serde_json::Value would reorder the keys before sending
    let response = server
        .post("/recommend")
        .bytes(r#"{"play_counts":{"x":2,"w":2,"v":2},"user_stats":[]}"#.into())
        .content_type("application/json")
        .await;

    response.assert_status_ok();
    let body: RecommendResponse = response.json();
    assert_eq!(body.trending_songs, vec!["x", "w", "v"]);
}

#[tokio::test]
async fn test_wrong_count_type_is_unprocessable() {
    let server = create_test_server();

    let response = server
        .post("/recommend")
        .json(&json!({ "play_counts": { "A": "many" } }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/recommend")
        .bytes(r#"{"play_counts": {"A": 1"#.into())
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported_media_type() {
    let server = create_test_server();

    let response = server
        .post("/recommend")
        .bytes(r#"{"play_counts":{},"user_stats":[]}"#.into())
        .await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let request_id = "6f1c1c2e-6a4b-4b71-9f6e-0b7d1a2c3d4e";

    let response = server
        .post("/recommend")
        .add_header(
            "x-request-id".parse::<axum::http::HeaderName>().unwrap(),
            request_id.parse::<axum::http::HeaderValue>().unwrap(),
        )
        .json(&sample_body())
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), request_id);
}

#[tokio::test]
async fn test_request_id_generated_when_missing() {
    let server = create_test_server();

    let response = server.post("/recommend").json(&sample_body()).await;

    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_metrics_recorded_per_request() {
    let sink = Arc::new(RecordingSink::default());
    let server = TestServer::new(create_router(AppState::new(sink.clone()))).unwrap();

    let response = server.post("/recommend").json(&sample_body()).await;
    let body: RecommendResponse = response.json();

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].num_trending, 5);
    assert_eq!(records[0].processing_time, body.processing_time);
}
