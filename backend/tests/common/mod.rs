#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use boilerplan::api::router;
use boilerplan::db;
use boilerplan::state::AppState;

pub async fn test_state() -> AppState {
    let pool = db::in_memory().await.expect("Failed to create database");
    AppState::new(pool, chrono::Duration::hours(1))
}

pub async fn test_app() -> Router {
    router(test_state().await)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Registers a user and returns `(token, user id)`.
pub async fn register(app: &Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": email, "password": "password123", "firstName": "Test" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

pub async fn create_semester(app: &Router, token: &str, term: &str, year: i64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/semesters",
        Some(token),
        Some(json!({ "term": term, "year": year })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create semester failed: {body}");
    body["id"].as_str().unwrap().to_string()
}
