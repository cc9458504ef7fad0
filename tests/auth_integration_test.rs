//! Registration and re-authentication flows against the mock transport.

mod common;

use common::*;
use seiun::auth::{Authenticator, RegistrationParams, SessionManager};
use seiun::error::{AuthError, SeiunError, ValidationError};
use std::sync::Arc;

const CREATE_SESSION: &str = "https://bsky.test/xrpc/com.atproto.server.createSession";
const CREATE_ACCOUNT: &str = "https://bsky.test/xrpc/com.atproto.server.createAccount";

fn setup() -> (MockHttpClient, InMemoryStore, Authenticator) {
    let http = MockHttpClient::new();
    let store = InMemoryStore::new();
    let sessions = Arc::new(SessionManager::new(Arc::new(store.clone())));
    (http.clone(), store, Authenticator::new(Arc::new(http), sessions))
}

#[tokio::test]
async fn test_registration_with_empty_handle_makes_no_request() {
    let (http, store, auth) = setup();

    let params = RegistrationParams::new("bsky.test", "alice@example.com", "", "hunter2");
    let err = auth.register(&params).await.unwrap_err();

    assert_eq!(
        err,
        SeiunError::Validation(ValidationError::MissingField { field: "handle" })
    );
    assert_eq!(http.request_count(), 0);
    assert!(store.get("session").is_none());
}

#[tokio::test]
async fn test_registration_rejects_each_bad_field_before_sending() {
    let (http, _, auth) = setup();

    let cases = [
        RegistrationParams::new("", "alice@example.com", "alice", "pw"),
        RegistrationParams::new("bsky.test", "not-an-email", "alice", "pw"),
        RegistrationParams::new("bsky.test", "alice@example.com", "al ice", "pw"),
        RegistrationParams::new("bsky.test", "alice@example.com", "alice", ""),
    ];
    for params in cases {
        assert!(!params.is_valid());
        assert!(matches!(
            auth.register(&params).await,
            Err(SeiunError::Validation(_))
        ));
    }
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn test_registration_success_logs_in() {
    let (http, store, auth) = setup();
    http.set_response(CREATE_ACCOUNT, MockResponse::json(200, session_body("a1")));

    let params = RegistrationParams::new("bsky.test", "alice@example.com", "alice", "pw");
    let session = auth.register(&params).await.unwrap();

    assert_eq!(session.handle, "alice.bsky.test");
    assert!(store.get("session").is_some());
    assert!(store.get("credential").is_some());
}

#[tokio::test]
async fn test_server_rejects_registration() {
    let (http, store, auth) = setup();
    http.set_response(
        CREATE_ACCOUNT,
        MockResponse::json(
            400,
            serde_json::json!({ "error": "InvalidInviteCode", "message": "Provided invite code not available" }),
        ),
    );

    let params = RegistrationParams::new("bsky.test", "alice@example.com", "alice", "pw")
        .with_invite_code("used-code");
    match auth.register(&params).await.unwrap_err() {
        SeiunError::Server(err) => {
            assert_eq!(err.error.as_deref(), Some("InvalidInviteCode"));
            assert_eq!(err.user_message(), "Provided invite code not available");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    assert!(store.get("credential").is_none());
}

#[tokio::test]
async fn test_reauthenticate_after_restart() {
    let (http, store, auth) = setup();
    http.enqueue_response(CREATE_SESSION, MockResponse::json(200, session_body("a1")));
    http.enqueue_response(CREATE_SESSION, MockResponse::json(200, session_body("a2")));
    auth.login("bsky.test", "alice.bsky.test", "pw").await.unwrap();

    // A fresh authenticator over the same store finds the credential
    let sessions = Arc::new(SessionManager::new(Arc::new(store)));
    let restarted = Authenticator::new(Arc::new(http.clone()), sessions.clone());
    let session = restarted.reauthenticate().await.unwrap();

    assert_eq!(session.access_token, "a2");
    assert_eq!(sessions.current().unwrap().access_token, "a2");
}

#[tokio::test]
async fn test_logout_then_reauthenticate_fails() {
    let (http, _, auth) = setup();
    http.set_response(CREATE_SESSION, MockResponse::json(200, session_body("a1")));
    auth.login("bsky.test", "alice.bsky.test", "pw").await.unwrap();

    auth.logout().await.unwrap();
    assert_eq!(
        auth.reauthenticate().await.unwrap_err(),
        SeiunError::Auth(AuthError::NoCredential)
    );
    assert_eq!(http.request_count(), 1);
}
