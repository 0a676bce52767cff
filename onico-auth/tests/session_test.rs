//! Integration tests for session state transitions

use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use onico_api::{
    ApiError, Client, CredentialStore, Credentials, MemoryCredentialStore, Request, SecretString,
};
use onico_auth::{connect, AuthError, Session, SessionState, Settings};

const USER: &str = r#"{
    "id": "0d8f4a8e-7c55-4c1e-9a0e-2b5b1c4f7d10",
    "firstName": "Anna",
    "lastName": "Bianchi",
    "email": "anna@example.com"
}"#;

fn auth_body(token: &str, refresh: &str) -> String {
    format!(
        r#"{{"token": "{}", "refreshToken": "{}", "user": {}}}"#,
        token, refresh, USER
    )
}

fn session_with(server: &ServerGuard, store: &Arc<MemoryCredentialStore>) -> Arc<Session> {
    let client = Client::new(format!("{}/api/v1", server.url()), store.clone());
    Arc::new(Session::new(Arc::new(client)))
}

fn password(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

#[tokio::test]
async fn login_stores_credentials_and_authenticates() {
    //* Given
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/v1/auth/login")
        .match_body(Matcher::Json(
            serde_json::json!({"email": "anna@example.com", "password": "secret"}),
        ))
        .with_status(200)
        .with_body(auth_body("t1", "r1"))
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let session = session_with(&server, &store);
    let mut state = session.subscribe();
    assert!(!session.is_authenticated());

    //* When
    let user = session
        .login("anna@example.com", password("secret"))
        .await
        .unwrap();

    //* Then
    login.assert_async().await;
    assert_eq!(user.full_name(), "Anna Bianchi");
    assert_eq!(store.load().unwrap(), Some(Credentials::new("t1", "r1")));
    assert!(state.has_changed().unwrap());
    let published = state.borrow_and_update().clone();
    assert!(published.is_authenticated);
    assert_eq!(published.current_user, Some(user));
}

#[tokio::test]
async fn rejected_login_leaves_session_untouched() {
    //* Given
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/auth/login")
        .with_status(401)
        .with_body(r#"{"data": null, "message": "Invalid credentials"}"#)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let session = session_with(&server, &store);

    //* When
    let result = session.login("anna@example.com", password("wrong")).await;

    //* Then
    let err = result.unwrap_err();
    assert!(matches!(err, AuthError::Api(ApiError::Server(_))));
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!session.is_authenticated());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn register_signs_in_the_new_account() {
    //* Given
    let mut server = Server::new_async().await;
    let register = server
        .mock("POST", "/api/v1/auth/register")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "firstName": "Anna",
            "lastName": "Bianchi",
            "email": "anna@example.com"
        })))
        .with_status(201)
        .with_body(auth_body("t1", "r1"))
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let session = session_with(&server, &store);

    //* When
    let user = session
        .register("Anna", "Bianchi", "anna@example.com", password("secret"))
        .await
        .unwrap();

    //* Then
    register.assert_async().await;
    assert_eq!(user.email, "anna@example.com");
    assert!(session.is_authenticated());
    assert_eq!(store.load().unwrap(), Some(Credentials::new("t1", "r1")));
}

#[tokio::test]
async fn logout_is_idempotent() {
    let server = Server::new_async().await;
    let store = Arc::new(MemoryCredentialStore::with_credentials(&Credentials::new(
        "t1", "r1",
    )));
    let session = session_with(&server, &store);
    assert!(session.is_authenticated());

    session.logout();
    let after_first = session.state();
    session.logout();

    assert_eq!(session.state(), after_first);
    assert!(!after_first.is_authenticated);
    assert!(after_first.current_user.is_none());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn initialize_loads_profile_for_stored_credentials() {
    //* Given
    let mut server = Server::new_async().await;
    let me = server
        .mock("GET", "/api/v1/me")
        .match_header("authorization", "Bearer t1")
        .with_status(200)
        .with_body(format!(r#"{{"data": {}, "message": null}}"#, USER))
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(&Credentials::new(
        "t1", "r1",
    )));
    let session = session_with(&server, &store);

    //* When
    session.initialize().await;

    //* Then
    me.assert_async().await;
    assert!(session.is_authenticated());
    assert_eq!(
        session.current_user().map(|user| user.first_name),
        Some("Anna".to_string())
    );
}

#[tokio::test]
async fn initialize_without_credentials_sends_nothing() {
    let mut server = Server::new_async().await;
    let me = server
        .mock("GET", "/api/v1/me")
        .expect(0)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let session = session_with(&server, &store);

    session.initialize().await;

    me.assert_async().await;
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn initialize_logs_out_when_profile_cannot_be_loaded() {
    //* Given
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/me")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v1/auth/refresh")
        .with_status(401)
        .with_body(r#"{"message": "Refresh token expired"}"#)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(&Credentials::new(
        "t1", "r1",
    )));
    let session = session_with(&server, &store);

    //* When
    session.initialize().await;

    //* Then
    assert!(!session.is_authenticated());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn logout_during_profile_fetch_stays_logged_out() {
    //* Given
    let mut server = Server::new_async().await;
    let me = server
        .mock("GET", "/api/v1/me")
        .with_status(200)
        .with_body_from_request(|_| {
            std::thread::sleep(Duration::from_millis(300));
            format!(r#"{{"data": {}, "message": null}}"#, USER).into_bytes()
        })
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(&Credentials::new(
        "t1", "r1",
    )));
    let session = session_with(&server, &store);

    //* When
    let restoring = tokio::spawn({
        let session = session.clone();
        async move { session.initialize().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.logout();
    restoring.await.unwrap();

    //* Then
    me.assert_async().await;
    assert_eq!(session.state(), SessionState::default());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn expiry_during_a_request_logs_out() {
    //* Given
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/clients")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v1/auth/refresh")
        .with_status(500)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(&Credentials::new(
        "t1", "r1",
    )));
    let session = session_with(&server, &store);
    let _watcher = session.watch_expiry();
    let mut state = session.subscribe();
    assert!(state.borrow().is_authenticated);

    //* When
    let result = session.client().send(Request::clients().list()).await;

    //* Then
    assert!(matches!(result, Err(ApiError::SessionExpired)));
    tokio::time::timeout(
        Duration::from_secs(1),
        state.wait_for(|state| !state.is_authenticated),
    )
    .await
    .expect("session did not log out")
    .unwrap();
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn connect_uses_configured_credentials_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    let settings = Settings {
        base_url: "http://localhost:8282/api/v1".into(),
        timeout_secs: 5,
        credentials_path: Some(path.clone()),
    };

    let client = connect(&settings).unwrap();
    client
        .credentials()
        .save(&Credentials::new("t1", "r1"))
        .unwrap();

    assert_eq!(client.base_url(), "http://localhost:8282/api/v1");
    assert!(path.exists());
    let session = Session::new(Arc::new(client));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn connect_rejects_invalid_settings() {
    let settings = Settings {
        base_url: "onicotech.local".into(),
        ..Settings::default()
    };

    assert!(matches!(
        connect(&settings),
        Err(AuthError::Configuration(_))
    ));
}
