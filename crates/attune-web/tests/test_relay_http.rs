//! End-to-end tests over the real router, with the provider stubbed out.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use tower::ServiceExt;

use attune_db::AuditStore;
use attune_llm::backend::{CompletionRequest, CompletionResponse, LlmBackend, LlmError};
use attune_llm::gateway::{CompletionGateway, DEFAULT_PERSONA, FALLBACK_REPLY};
use attune_web::router::build_router;
use attune_web::state::AppState;

struct StubBackend {
    reply: Result<String, String>,
}

#[async_trait]
impl LlmBackend for StubBackend {
    async fn complete(&self, _req: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        match &self.reply {
            Ok(text) => Ok(CompletionResponse {
                content: text.clone(),
                model: "stub".to_string(),
                prompt_tokens: 0,
                completion_tokens: 0,
            }),
            Err(msg) => Err(LlmError::Api { status: 500, message: msg.clone() }),
        }
    }

    fn model_id(&self) -> &str {
        "stub"
    }
}

fn app_with(reply: Option<Result<String, String>>, store: AuditStore) -> axum::Router {
    let backend = reply.map(|r| Arc::new(StubBackend { reply: r }) as Arc<dyn LlmBackend>);
    let gateway = CompletionGateway::new(backend, DEFAULT_PERSONA);
    build_router(AppState::new(gateway, store))
}

async fn post(app: axum::Router, content_type: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/qualtrics-response")
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_form_submission_returns_reply() {
    let app = app_with(Some(Ok("That sounds really hard.".to_string())), AuditStore::disabled());
    let (status, body) = post(
        app,
        "application/x-www-form-urlencoded",
        "prompt=I+feel+overwhelmed",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "That sounds really hard.");
}

#[tokio::test]
async fn test_empty_json_prompt_short_circuits() {
    let app = app_with(Some(Ok("should never be called".to_string())), AuditStore::disabled());
    let (status, body) = post(app, "application/json", r#"{"prompt": "", "variant": "A"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "");
}

#[tokio::test]
async fn test_user_text_without_credential_gets_fallback() {
    // No backend configured at all, as with an unset OPENAI_API_KEY.
    let app = app_with(None, AuditStore::disabled());
    let (status, body) = post(app, "application/json", r#"{"user_text": "test", "variant": "B"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], FALLBACK_REPLY);
    assert!(!body["reply"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_200_and_leaks_nothing() {
    let secret = "Incorrect API key provided: sk-secret-123";
    let app = app_with(Some(Err(secret.to_string())), AuditStore::disabled());
    let (status, body) = post(app, "application/json", r#"{"prompt": "hello"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], FALLBACK_REPLY);
    assert!(!body.to_string().contains("sk-secret-123"));
}

#[tokio::test]
async fn test_unreachable_persistence_leaves_response_unchanged() {
    // Enabled store pointing at a closed port: append fails and is
    // swallowed, the reply must match the disabled-store case exactly.
    let dead_store = AuditStore::connect(Some("postgres://u:p@127.0.0.1:1/nope"));
    assert!(dead_store.is_enabled());

    let app = app_with(Some(Ok("A supportive reply.".to_string())), dead_store);
    let (status, body) = post(app, "application/x-www-form-urlencoded", "prompt=hi").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "A supportive reply.");
}

#[tokio::test]
async fn test_missing_fields_treated_as_empty() {
    let app = app_with(Some(Ok("unused".to_string())), AuditStore::disabled());
    let (status, body) = post(app, "application/json", r#"{"unrelated": true}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "");
}

#[tokio::test]
async fn test_health_probe() {
    let app = app_with(None, AuditStore::disabled());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
