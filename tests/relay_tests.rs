//! Session Relay Tests
//!
//! Drives `POST /session-token` through the real router against a wiremock
//! stand-in for the realtime provider.

use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use interview_relay::{
    ServerConfig,
    config::MalformedBodyPolicy,
    core::session::{RealtimeConfig, SessionConfig},
    routes,
    state::AppState,
};

const TEST_API_KEY: &str = "sk-test-relay-key";
const SESSIONS_PATH: &str = "/v1/realtime/sessions";

/// Helper function to create a test configuration pointing at `base_url`
fn create_test_config(base_url: &str, api_key: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 5000,
        tls: None,
        openai_api_key: api_key.map(str::to_string),
        realtime: RealtimeConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
            ..RealtimeConfig::default()
        },
        interview_defaults: SessionConfig::default(),
        malformed_body_policy: MalformedBodyPolicy::Fallback,
        feedback_storage_path: PathBuf::from("./.interview-relay-test"),
        cors_allowed_origins: None,
        rate_limit_requests_per_second: 100000, // Disable for tests
        rate_limit_burst_size: 100,
    }
}

fn create_app(config: ServerConfig) -> Router {
    let app_state = AppState::new(config).unwrap();
    routes::api::create_api_router().with_state(app_state)
}

fn provider_base(server: &MockServer) -> String {
    format!("{}/v1", server.uri())
}

/// Find an available port for testing
fn find_available_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn post(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Body of the single request the provider stub received.
async fn upstream_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one upstream call");
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn test_token_issued_for_interview_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .and(header("authorization", format!("Bearer {TEST_API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(
        app,
        "/session-token",
        r#"{"interviewType":"technical","position":"Backend Engineer"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"clientCredential": {"value": "abc123"}, "client_token": "abc123"})
    );

    let sent = upstream_body(&server).await;
    assert_eq!(sent["model"], "gpt-4o-realtime-preview-2024-12-17");
    assert_eq!(sent["voice"], "alloy");
    assert_eq!(sent["modalities"], json!(["audio", "text"]));
    assert_eq!(sent["tool_choice"], "auto");
    let instructions = sent["instructions"].as_str().unwrap();
    assert!(instructions.contains("a technical interview for a Backend Engineer position"));
    assert_eq!(sent["tools"][0]["type"], "function");
    assert_eq!(sent["tools"][0]["name"], "saveInterviewFeedback");
}

#[tokio::test]
async fn test_alias_route_behaves_identically() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/api/session", "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientCredential"]["value"], "tok");
}

#[tokio::test]
async fn test_missing_api_key_never_calls_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), None));
    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "OPENAI_API_KEY is not set"}));
}

#[tokio::test]
async fn test_empty_body_uses_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, _) = post(app, "/session-token", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);

    let sent = upstream_body(&server).await;
    let instructions = sent["instructions"].as_str().unwrap();
    assert!(instructions.contains("a technical interview for a Software Developer position"));
}

#[tokio::test]
async fn test_malformed_body_falls_back_to_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/session-token", "{this is not json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientCredential"]["value"], "tok");

    let sent = upstream_body(&server).await;
    assert!(
        sent["instructions"]
            .as_str()
            .unwrap()
            .contains("Software Developer")
    );
}

#[tokio::test]
async fn test_root_post_creates_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "root-tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(
        app,
        "/",
        r#"{"interviewType":"technical","position":"Backend Engineer"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientCredential"]["value"], "root-tok");

    let sent = upstream_body(&server).await;
    assert!(
        sent["instructions"]
            .as_str()
            .unwrap()
            .contains("a technical interview for a Backend Engineer position")
    );
}

#[tokio::test]
async fn test_wrong_typed_optional_field_keeps_other_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config(&provider_base(&server), Some(TEST_API_KEY));
    config.malformed_body_policy = MalformedBodyPolicy::Reject;
    let app = create_app(config);

    let (status, _) = post(
        app,
        "/session-token",
        r#"{"interviewType":"behavioral","position":"Backend Engineer","feedbackEnabled":"yes","voice":7}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = upstream_body(&server).await;
    assert!(
        sent["instructions"]
            .as_str()
            .unwrap()
            .contains("a behavioral interview for a Backend Engineer position")
    );
    assert_eq!(sent["voice"], "alloy");
    assert_eq!(sent["tools"][0]["name"], "saveInterviewFeedback");
}

#[tokio::test]
async fn test_position_is_embedded_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, _) = post(
        app,
        "/session-token",
        r#"{"interviewType":"technical","position":"  Site Reliability Engineer "}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = upstream_body(&server).await;
    assert!(
        sent["instructions"]
            .as_str()
            .unwrap()
            .contains("a technical interview for a   Site Reliability Engineer  position")
    );
}

#[tokio::test]
async fn test_malformed_body_rejected_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&provider_base(&server), Some(TEST_API_KEY));
    config.malformed_body_policy = MalformedBodyPolicy::Reject;
    let app = create_app(config);

    let (status, body) = post(app, "/session-token", "{this is not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body")
    );
}

#[tokio::test]
async fn test_upstream_error_status_is_reported_and_redacted() {
    let server = MockServer::start().await;
    let upstream_error = format!(
        r#"{{"error":{{"message":"Incorrect API key provided: {TEST_API_KEY}"}}}}"#
    );
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(upstream_error))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("401"));
    assert!(message.contains("Incorrect API key provided"));
    assert!(message.contains("[REDACTED]"));
    assert!(!message.contains(TEST_API_KEY));
}

#[tokio::test]
async fn test_upstream_error_body_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("x".repeat(5000)))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("503"));
    assert!(message.chars().filter(|c| *c == 'x').count() <= 512);
}

#[tokio::test]
async fn test_oversized_upstream_error_body_is_capped() {
    let server = MockServer::start().await;
    let mut body = format!("{TEST_API_KEY} ");
    body.push_str(&"y".repeat(4 * 1024 * 1024));
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("502"));
    assert!(message.starts_with("API request failed with status 502: [REDACTED]"));
    assert!(message.chars().filter(|c| *c == 'y').count() <= 512);
}

#[tokio::test]
async fn test_oversized_upstream_success_body_is_malformed() {
    let server = MockServer::start().await;
    let padding = "z".repeat(2 * 1024 * 1024);
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"client_token": "tok", "padding": padding})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Malformed response from realtime provider")
    );
}

#[tokio::test]
async fn test_malformed_upstream_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Malformed response")
    );
}

#[tokio::test]
async fn test_upstream_reply_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "sess_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("no client token"));
}

#[tokio::test]
async fn test_client_secret_value_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sess_1",
            "client_secret": {"value": "ek_123", "expires_at": 1735000000}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientCredential"]["value"], "ek_123");
    assert_eq!(body["id"], "sess_1");
    assert_eq!(body["client_secret"]["expires_at"], 1735000000);
}

#[tokio::test]
async fn test_normalized_credential_overrides_provider_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "client_token": "real",
            "clientCredential": "spoofed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (_, body) = post(app, "/session-token", "{}").await;

    assert_eq!(body["clientCredential"], json!({"value": "real"}));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"client_token": "late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = create_test_config(&provider_base(&server), Some(TEST_API_KEY));
    config.realtime.timeout_seconds = 1;
    let app = create_app(config);

    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Realtime provider did not respond within 1 seconds"
    );
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_fault() {
    let port = find_available_port();
    let app = create_app(create_test_config(
        &format!("http://127.0.0.1:{port}/v1"),
        Some(TEST_API_KEY),
    ));

    let (status, body) = post(app, "/session-token", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to reach realtime provider"));
    assert!(!message.contains(TEST_API_KEY));
}

#[tokio::test]
async fn test_feedback_disabled_omits_tools() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, _) = post(app, "/session-token", r#"{"feedbackEnabled":false}"#).await;
    assert_eq!(status, StatusCode::OK);

    let sent = upstream_body(&server).await;
    assert!(sent.get("tools").is_none());
}

#[tokio::test]
async fn test_voice_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));
    let (status, _) = post(
        app,
        "/session-token",
        r#"{"interviewType":"behavioral","position":"Staff Designer","voice":"shimmer"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let sent = upstream_body(&server).await;
    assert_eq!(sent["voice"], "shimmer");
    let instructions = sent["instructions"].as_str().unwrap();
    assert!(instructions.contains("a behavioral interview for a Staff Designer position"));
}

#[tokio::test]
async fn test_requests_do_not_leak_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_token": "tok"})))
        .expect(2)
        .mount(&server)
        .await;

    let app = create_app(create_test_config(&provider_base(&server), Some(TEST_API_KEY)));

    let (status, _) = post(
        app.clone(),
        "/session-token",
        r#"{"interviewType":"hr","position":"Recruiter"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(app, "/session-token", "{}").await;
    assert_eq!(status, StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    let second: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let instructions = second["instructions"].as_str().unwrap();
    assert!(instructions.contains("Software Developer"));
    assert!(!instructions.contains("Recruiter"));
}
