//! Login flow tests using WireMock
//!
//! The host login primitive is replaced by fixed outcomes; the backend is a
//! mock server. Each test pins how many login requests are issued.

use std::sync::Arc;

use wechat_mp_client::error::{ClientError, PlatformError};
use wechat_mp_client::flows::LoginOutcome;
use wechat_mp_client::host::{KeyValueStore, StaticLogin, TestCodeLogin, TOKEN_KEY};
use wechat_mp_client::sink::{FlowEvent, RecordingSink};
use wechat_mp_client::storage::MemoryStore;
use wechat_mp_client::types::LoginResult;
use wechat_mp_client::MiniProgram;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(base_url: &str, sink: &Arc<RecordingSink>) -> MiniProgram {
    MiniProgram::builder()
        .base_url(base_url)
        .sink(sink.clone())
        .build()
        .unwrap()
}

/// Base URL of a port nothing listens on
fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Login succeeds with a code, POST succeeds: response logged, nothing else
#[tokio::test]
async fn test_code_exchanged_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({ "code": "abc123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "xyz"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&mock_server.uri(), &sink);

    let outcome = mp.login(Arc::new(StaticLogin::code("abc123"))).await;

    let response = outcome.response().expect("login response");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.data, serde_json::json!({ "token": "xyz" }));

    let events = sink.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], FlowEvent::LoginSucceeded { .. }));
    assert_eq!(
        events[1],
        FlowEvent::CodeReceived {
            code: "abc123".to_string()
        }
    );
    assert!(matches!(events[2], FlowEvent::LoginResponse { .. }));
    assert!(sink.failures().is_empty());
}

/// Empty code: no request, not reported as a failure
#[tokio::test]
async fn test_empty_code_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&mock_server.uri(), &sink);

    let outcome = mp.login(Arc::new(StaticLogin::code(""))).await;

    assert!(matches!(outcome, LoginOutcome::NoCode));
    assert!(!outcome.posted());
    assert_eq!(sink.events().len(), 1);
    assert!(sink.failures().is_empty());
}

/// Missing code behaves like an empty one
#[tokio::test]
async fn test_missing_code_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&mock_server.uri(), &sink);

    let login = StaticLogin::success(LoginResult::without_code());
    let outcome = mp.login(Arc::new(login)).await;

    assert!(matches!(outcome, LoginOutcome::NoCode));
    assert!(sink.failures().is_empty());
}

/// Login primitive fails: error logged, no request
#[tokio::test]
async fn test_login_failure_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&mock_server.uri(), &sink);

    let login = StaticLogin::failure(PlatformError::new("timeout"));
    let outcome = mp.login(Arc::new(login)).await;

    match outcome {
        LoginOutcome::LoginFailed(error) => assert_eq!(error.err_msg, "timeout"),
        other => panic!("expected login failure, got {:?}", other),
    }
    assert_eq!(
        sink.events(),
        vec![FlowEvent::LoginFailed {
            error: PlatformError::new("timeout")
        }]
    );
}

/// Transport failure on the POST is logged and not retried
#[tokio::test]
async fn test_post_failure_logged() {
    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&unreachable_base_url(), &sink);

    let outcome = mp.login(Arc::new(StaticLogin::code("abc123"))).await;

    assert!(matches!(outcome, LoginOutcome::PostFailed(ClientError::Http(_))));
    assert!(outcome.posted());

    let failures = sink.failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], FlowEvent::LoginRequestFailed { .. }));
}

/// A non-2xx answer is still a response, not a failure
#[tokio::test]
async fn test_error_status_is_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "status": "error",
            "code": 1001,
            "message": "invalid code"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&mock_server.uri(), &sink);

    let outcome = mp.login(Arc::new(StaticLogin::code("bad"))).await;

    assert_eq!(outcome.response().unwrap().status_code, 400);
    assert!(sink.failures().is_empty());
}

#[tokio::test]
async fn test_session_persisted_when_enabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({ "code": "test_code_1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {
                "access_token": "jwt_access",
                "refresh_token": "jwt_refresh",
                "user": { "id": 1 }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&mock_server.uri(), &sink);
    let store = Arc::new(MemoryStore::new());

    let outcome = mp
        .login_flow(Arc::new(TestCodeLogin::new()))
        .persist_session_to(store.clone())
        .run()
        .await;

    assert!(outcome.response().is_some());
    assert_eq!(store.get_item(TOKEN_KEY), Some("jwt_access".to_string()));
}

/// A plain `{token}` body is not a session envelope
#[tokio::test]
async fn test_untyped_body_not_persisted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "xyz"
        })))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&mock_server.uri(), &sink);
    let store = Arc::new(MemoryStore::new());

    mp.login_flow(Arc::new(StaticLogin::code("abc123")))
        .persist_session_to(store.clone())
        .run()
        .await;

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_persist_failure_logged() {
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), ClientError> {
            Err(ClientError::Storage("read-only".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), ClientError> {
            Err(ClientError::Storage("read-only".to_string()))
        }
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": { "access_token": "jwt_access" }
        })))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::new());
    let mp = create_client(&mock_server.uri(), &sink);

    let outcome = mp
        .login_flow(Arc::new(StaticLogin::code("abc123")))
        .persist_session_to(Arc::new(ReadOnlyStore))
        .run()
        .await;

    // the login itself still succeeded
    assert!(outcome.response().is_some());
    assert_eq!(
        sink.failures(),
        vec![FlowEvent::SessionPersistFailed {
            error: "Storage error: read-only".to_string()
        }]
    );
}
