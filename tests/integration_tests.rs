//! Integration tests
//!
//! Drive the webhook service router end to end with a fake code issuer

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use botads::config::Settings;
use botads::services::CodeIssuer;
use botads::{create_router, sign_payload, ApiError, BotadsError, BotadsResult, CodeResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const SECRET: &str = "bot-token-for-integration-tests";

/// Canned outcome returned by the fake issuer
#[derive(Clone, Copy)]
enum Outcome {
    Issued,
    RateLimited,
    Malformed,
}

struct FakeIssuer {
    outcome: Outcome,
    calls: Mutex<Vec<(i64, String)>>,
}

impl FakeIssuer {
    fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CodeIssuer for FakeIssuer {
    async fn create_code(&self, bot_id: i64, user_tg_id: &str) -> BotadsResult<CodeResponse> {
        self.calls.lock().unwrap().push((bot_id, user_tg_id.to_string()));
        match self.outcome {
            Outcome::Issued => Ok(CodeResponse {
                code: "abc123".to_string(),
                expires_in: 300,
                expires_at: "2024-01-01T00:05:00Z".to_string(),
            }),
            Outcome::RateLimited => Err(BotadsError::Api(ApiError::new(
                429,
                "RATE_LIMITED",
                "slow down",
                None,
            ))),
            Outcome::Malformed => {
                Err(serde_json::from_str::<CodeResponse>("{}").unwrap_err().into())
            }
        }
    }
}

fn create_test_settings(extra: &[(&str, &str)]) -> Settings {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("BOTADS_API_TOKEN".to_string(), SECRET.to_string());
    vars.insert("BOTADS_BOT_ID".to_string(), "42".to_string());
    vars.insert("MAX_BODY_SIZE".to_string(), "1024".to_string());
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    Settings::from_lookup(|key| vars.get(key).cloned()).expect("Failed to create test settings")
}

fn create_app(outcome: Outcome) -> (Router, Arc<FakeIssuer>) {
    let issuer = FakeIssuer::new(outcome);
    let app = create_router(create_test_settings(&[]), issuer.clone())
        .expect("Failed to create router");
    (app, issuer)
}

fn webhook_request(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("X-Signature", signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let (app, _) = create_app(Outcome::Issued);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "botads");
    assert!(health["timestamp"].is_string());
}

#[tokio::test]
async fn test_webhook_accepts_signed_body() {
    let (app, _) = create_app(Outcome::Issued);
    let body = r#"{"event":"rewarded","user_tg_id":"7","data":{"campaign":"c1"}}"#;
    let signature = sign_payload(body.as_bytes(), SECRET).unwrap();

    let response = app.oneshot(webhook_request(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_webhook_accepts_unknown_event() {
    let (app, _) = create_app(Outcome::Issued);
    let body = r#"{"event":"impression","user_tg_id":"7"}"#;
    let signature = sign_payload(body.as_bytes(), SECRET).unwrap();

    let response = app.oneshot(webhook_request(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_rejects_bad_signature() {
    let (app, _) = create_app(Outcome::Issued);
    let body = r#"{"event":"rewarded","user_tg_id":"7"}"#;
    let signature = sign_payload(body.as_bytes(), "some-other-secret").unwrap();

    let response = app.oneshot(webhook_request(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error = body_json(response).await;
    assert_eq!(error["error"]["type"], "authentication_error");
}

#[tokio::test]
async fn test_webhook_rejects_missing_signature() {
    let (app, _) = create_app(Outcome::Issued);
    let body = r#"{"event":"rewarded","user_tg_id":"7"}"#;

    let response = app.oneshot(webhook_request(body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_webhook_bad_signature_wins_over_bad_body() {
    let (app, _) = create_app(Outcome::Issued);

    let response = app
        .oneshot(webhook_request("not json", Some("deadbeef")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_webhook_rejects_malformed_signed_body() {
    let (app, _) = create_app(Outcome::Issued);
    let body = r#"{"event":"rewarded"}"#;
    let signature = sign_payload(body.as_bytes(), SECRET).unwrap();

    let response = app.oneshot(webhook_request(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn test_webhook_custom_signature_header() {
    let settings = create_test_settings(&[
        ("BOTADS_SIGNATURE_HEADER", "X-Botads-Signature"),
        ("BOTADS_WEBHOOK_SECRET", "dedicated-secret"),
    ]);
    let app = create_router(settings, FakeIssuer::new(Outcome::Issued)).unwrap();
    let body = r#"{"event":"direct_link","user_tg_id":"7"}"#;
    let signature = sign_payload(body.as_bytes(), "dedicated-secret").unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("X-Botads-Signature", signature)
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_body_limit() {
    let (app, _) = create_app(Outcome::Issued);
    let body = "x".repeat(4096);

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-length", body.len())
        .header("X-Signature", sign_payload(body.as_bytes(), SECRET).unwrap())
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

fn codes_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/codes")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_codes_endpoint_issues_code() {
    let (app, issuer) = create_app(Outcome::Issued);

    let response = app.oneshot(codes_request(r#"{"user_tg_id":"7"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let issued = body_json(response).await;
    assert_eq!(issued["code"], "abc123");
    assert_eq!(issued["expires_in"], 300);
    assert_eq!(issued["expires_at"], "2024-01-01T00:05:00Z");
    assert_eq!(issued["direct_link"], "https://botads.me/abc123");
    assert_eq!(*issuer.calls.lock().unwrap(), vec![(42, "7".to_string())]);
}

#[tokio::test]
async fn test_codes_endpoint_surfaces_api_error() {
    let (app, _) = create_app(Outcome::RateLimited);

    let response = app.oneshot(codes_request(r#"{"user_tg_id":"7"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error = body_json(response).await;
    assert_eq!(error["error"]["type"], "api_error");
    assert_eq!(error["error"]["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_codes_endpoint_malformed_upstream() {
    let (app, _) = create_app(Outcome::Malformed);

    let response = app.oneshot(codes_request(r#"{"user_tg_id":"7"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_codes_endpoint_rejects_empty_user() {
    let (app, issuer) = create_app(Outcome::Issued);

    let response = app.oneshot(codes_request(r#"{"user_tg_id":"  "}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(issuer.calls.lock().unwrap().is_empty());
}
