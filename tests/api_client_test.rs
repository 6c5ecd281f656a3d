//! Tests for the HTTP client against a local axum server.

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use serde_json::{Value, json};

use rapidread::{ApiClient, ApiErrorKind, Credentials, NewAccount, ValidationError};

async fn list_users() -> Json<Value> {
    Json(json!([]))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("ana"), Some("secret1")) => (
            StatusCode::OK,
            Json(json!({"username": "ana", "email": "ana@mail.com"})),
        ),
        (Some("ghost"), _) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        ),
    }
}

async fn create_user(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "taken" {
        (
            StatusCode::CONFLICT,
            Json(json!({"message": "Username already exists"})),
        )
    } else {
        (StatusCode::CREATED, Json(json!({"id": 1})))
    }
}

async fn process(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) != Some("application/json") {
        return (StatusCode::NOT_ACCEPTABLE, Json(json!({"error": "bad accept"})));
    }
    match body["text"].as_str() {
        Some("boom") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Highlighter crashed"})),
        ),
        Some(text) => (
            StatusCode::OK,
            Json(json!({"text": format!("<strong>{}</strong>", text)})),
        ),
        None => (StatusCode::BAD_REQUEST, Json(json!({"error": "No text"}))),
    }
}

/// Starts the fake backend and returns its base URL.
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/usuarios", get(list_users).post(create_user))
        .route("/login", post(login))
        .route("/process", post(process));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    format!("http://{}", addr)
}

/// A URL nothing listens on.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    drop(listener);
    format!("http://{}", addr)
}

async fn client() -> ApiClient {
    let url = spawn_backend().await;
    ApiClient::new(url.clone(), url).expect("Failed to build client")
}

#[tokio::test]
async fn test_check_server() {
    assert!(client().await.check_server().await);

    let url = dead_url().await;
    let offline = ApiClient::new(url.clone(), url).unwrap();
    assert!(!offline.check_server().await);
}

#[tokio::test]
async fn test_login_success_returns_profile() {
    let profile = client()
        .await
        .login(&Credentials::new("ana".into(), "secret1".into()))
        .await
        .expect("Login failed");
    assert_eq!(profile.username(), "ana");
    assert_eq!(profile.email(), "ana@mail.com");
}

#[tokio::test]
async fn test_login_rejection_uses_detail() {
    let err = client()
        .await
        .login(&Credentials::new("ana".into(), "wrong".into()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Rejected("Invalid credentials".into()));
    assert!(!err.is_unavailable());
}

#[tokio::test]
async fn test_login_rejection_without_detail_uses_default() {
    let err = client()
        .await
        .login(&Credentials::new("ghost".into(), "x".into()))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Login failed");
}

#[tokio::test]
async fn test_register_created() {
    let account = NewAccount::new("bruno".into(), "bruno@mail.com".into(), "secret1".into());
    client().await.register(&account).await.expect("Register failed");
}

#[tokio::test]
async fn test_register_conflict_uses_message() {
    let account = NewAccount::new("taken".into(), "t@mail.com".into(), "secret1".into());
    let err = client().await.register(&account).await.unwrap_err();
    assert_eq!(err.message(), "Username already exists");
}

#[tokio::test]
async fn test_register_validates_before_sending() {
    // No server at all: validation must fail first.
    let url = dead_url().await;
    let offline = ApiClient::new(url.clone(), url).unwrap();
    let account = NewAccount::new("bruno".into(), "not-an-email".into(), "secret1".into());
    let err = offline.register(&account).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Validation(ValidationError::InvalidEmail));
}

#[tokio::test]
async fn test_process_text_returns_markup() {
    let html = client().await.process_text("casa").await.expect("Process failed");
    assert_eq!(html, "<strong>casa</strong>");
}

#[tokio::test]
async fn test_process_text_error_body() {
    let err = client().await.process_text("boom").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Rejected("Highlighter crashed".into()));
}

#[tokio::test]
async fn test_process_text_unreachable_is_unavailable() {
    let url = dead_url().await;
    let offline = ApiClient::new(url.clone(), url).unwrap();
    let err = offline.process_text("hola").await.unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_text_backend_can_differ() {
    let auth = dead_url().await;
    let text = spawn_backend().await;
    let split = ApiClient::new(auth, text).unwrap();
    assert_eq!(split.process_text("sol").await.unwrap(), "<strong>sol</strong>");
    assert!(!split.check_server().await);
}
