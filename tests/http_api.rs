use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use trendlens::config::ServiceConfig;
use trendlens::server::{build_router, AppState};

fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.trends.analyze_delay_ms = 0;
    config.trends.topics_delay_ms = 0;
    config
}

fn app_with(config: &ServiceConfig) -> Router {
    let state = AppState::from_config(config, None).unwrap();
    build_router(state, &config.server).unwrap()
}

fn app() -> Router {
    app_with(&test_config())
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_service() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "service": "TrendLens AI"}));
}

#[tokio::test]
async fn predict_wraps_result_in_envelope() {
    let (status, body) = send(post_json(
        "/api/predict",
        json!({"content": "I love this!", "platform": "tiktok"}),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["score"], 78.0);
    assert_eq!(body["data"]["confidence"], 0.85);
    assert_eq!(body["data"]["factors"][1], "Platform:tiktok");
    assert_eq!(
        body["data"]["recommendations"],
        json!([
            "Consider adding more detail to increase engagement",
            "Add relevant hashtags to increase discoverability"
        ])
    );
}

#[tokio::test]
async fn predict_defaults_to_general_platform() {
    let (status, body) = send(post_json(
        "/api/predict/virality",
        json!({"content": "A calm update about the schedule", "hashtags": ["#news"]}),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score"], 50.0);
    assert_eq!(body["data"]["factors"][1], "Platform:general");
    assert_eq!(
        body["data"]["recommendations"],
        json!(["Consider adding more detail to increase engagement"])
    );
}

#[tokio::test]
async fn malformed_request_is_a_client_error() {
    let (status, body) = send(post_json("/api/predict", json!({"platform": "tiktok"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert!(body["message"].as_str().unwrap().contains("content"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn empty_content_is_scored() {
    let (status, body) = send(post_json("/api/predict", json!({"content": ""}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score"], 50.0);
    assert_eq!(
        body["data"]["recommendations"],
        json!([
            "Consider adding more detail to increase engagement",
            "Add relevant hashtags to increase discoverability"
        ])
    );
}

#[tokio::test]
async fn generate_without_provider_returns_fallback() {
    let (status, body) = send(post_json(
        "/api/generate",
        json!({"topic": "remote work", "platform": "linkedin", "tone": "professional"}),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["fallback"], true);
    assert_eq!(body["data"]["platform"], "linkedin");
    assert_eq!(body["data"]["best_time"], "8:00 AM - 10:00 AM");
    assert!(body["data"]["content"]
        .as_str()
        .unwrap()
        .contains("remote work"));
}

#[tokio::test]
async fn generate_requires_topic() {
    let (status, body) = send(post_json("/api/generate", json!({"topic": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "topic is required");
}

#[tokio::test]
async fn trends_analyze_returns_one_entry_per_keyword() {
    let (status, body) = send(post_json(
        "/api/trends/analyze",
        json!({"keywords": ["rust", "coffee"]}),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["trends"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["platform"], "general");
    assert_eq!(body["data"]["timeframe"], "24h");
}

#[tokio::test]
async fn trends_analyze_rejects_empty_keywords() {
    let (status, body) = send(post_json("/api/trends/analyze", json!({"keywords": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn trending_topics_respects_limit() {
    let (status, body) = send(get("/api/trends/topics?limit=4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, _) = send(get("/api/trends/topics?limit=500")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(get("/api/trends/topics?limit=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn configured_seed_repeats_trending_topics() {
    let mut config = test_config();
    config.trends.seed = Some(11);
    let app = app_with(&config);

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(get("/api/trends/topics?limit=5"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        bodies.push(body["data"].clone());
    }
    assert_eq!(bodies[0], bodies[1]);
}
