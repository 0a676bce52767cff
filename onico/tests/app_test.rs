use std::sync::Arc;

use mockito::{Matcher, Server, ServerGuard};
use onico::{App, Command};
use onico_api::{Client, CredentialStore, Credentials, MemoryCredentialStore};

fn app_with(server: &ServerGuard, store: &Arc<MemoryCredentialStore>) -> App {
    let client = Client::new(format!("{}/api/v1", server.url()), store.clone());
    App::new(Arc::new(client))
}

fn signed_in() -> Arc<MemoryCredentialStore> {
    Arc::new(MemoryCredentialStore::with_credentials(&Credentials::new(
        "t1", "r1",
    )))
}

async fn run(app: &App, command: Command) -> anyhow::Result<String> {
    let mut out = Vec::new();
    app.run(command, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_login_with_password_flag() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/auth/login")
        .match_body(Matcher::Json(
            serde_json::json!({"email": "anna@example.com", "password": "secret"}),
        ))
        .with_status(200)
        .with_body(
            r#"{
                "token": "t1",
                "refreshToken": "r1",
                "user": {
                    "id": "0d8f4a8e-7c55-4c1e-9a0e-2b5b1c4f7d10",
                    "firstName": "Anna",
                    "lastName": "Bianchi",
                    "email": "anna@example.com"
                }
            }"#,
        )
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let app = app_with(&server, &store);

    let output = run(
        &app,
        Command::Login {
            email: "anna@example.com".into(),
            password: Some("secret".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(output, "✓ Logged in as Anna Bianchi\n");
    assert!(app.session().is_authenticated());
    assert_eq!(store.load().unwrap(), Some(Credentials::new("t1", "r1")));
}

#[tokio::test]
async fn test_data_commands_require_login() {
    let server = Server::new_async().await;
    let store = Arc::new(MemoryCredentialStore::new());
    let app = app_with(&server, &store);

    let err = run(&app, Command::Clients).await.unwrap_err();

    assert!(err.to_string().starts_with("Not logged in"));
}

#[tokio::test]
async fn test_clients_listing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/clients")
        .match_header("authorization", "Bearer t1")
        .with_status(200)
        .with_body(
            r#"{"data": [{
                "id": "6f1c2a34-8a55-4e2f-9a61-0c7d8f1b2e3a",
                "firstName": "Giulia",
                "lastName": "Rossi",
                "phone": "+39 333 1234567",
                "email": null,
                "notes": null
            }]}"#,
        )
        .create_async()
        .await;

    let store = signed_in();
    let app = app_with(&server, &store);

    let output = run(&app, Command::Clients).await.unwrap();

    assert!(output.contains("Giulia Rossi"));
    assert!(output.contains("+39 333 1234567"));
    assert!(output.ends_with("1 clients\n"));
}

#[tokio::test]
async fn test_expired_session_logs_out() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/dashboard")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v1/auth/refresh")
        .with_status(401)
        .create_async()
        .await;

    let store = signed_in();
    let app = app_with(&server, &store);
    let mut state = app.session().subscribe();

    let err = run(&app, Command::Dashboard).await.unwrap_err();

    assert_eq!(err.to_string(), "Session expired. Please log in again.");
    state
        .wait_for(|state| !state.is_authenticated)
        .await
        .unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_logout_twice() {
    let server = Server::new_async().await;
    let store = signed_in();
    let app = app_with(&server, &store);

    assert_eq!(run(&app, Command::Logout).await.unwrap(), "Logged out\n");
    assert_eq!(run(&app, Command::Logout).await.unwrap(), "Logged out\n");
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
async fn test_invalidate_cache() {
    let mut server = Server::new_async().await;
    let invalidate = server
        .mock("POST", "/api/v1/cache/invalidate")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let store = signed_in();
    let app = app_with(&server, &store);

    let output = run(&app, Command::InvalidateCache).await.unwrap();

    invalidate.assert_async().await;
    assert_eq!(output, "✓ Cache invalidated\n");
}
