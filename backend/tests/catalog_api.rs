mod common;

use axum::Router;
use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{register, send, test_app};

async fn seed(app: &Router, token: &str) {
    for course in [
        json!({ "code": "CS 18000", "title": "Problem Solving", "credits": 4,
                "department": "CS", "difficulty": 3, "workload": "high" }),
        json!({ "code": "CS 25100", "title": "Data Structures", "credits": 3,
                "department": "CS", "difficulty": 4, "workload": "high" }),
        json!({ "code": "CS 19300", "title": "Tools", "credits": 1,
                "department": "CS", "difficulty": 1, "workload": "low" }),
        json!({ "code": "MA 16100", "title": "Calculus I", "credits": 5,
                "department": "MA", "difficulty": 3, "workload": "high" }),
    ] {
        let (status, body) = send(
            app,
            "POST",
            "/api/purdue-courses",
            Some(token),
            Some(course),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "seed failed: {body}");
    }
}

fn codes(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn catalog_is_public_and_sorted_by_code() {
    let app = test_app().await;
    let (token, _) = register(&app, "pete@purdue.edu").await;
    seed(&app, &token).await;

    let (status, body) = send(&app, "GET", "/api/purdue-courses", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(codes(&body), ["CS 18000", "CS 19300", "CS 25100", "MA 16100"]);
}

#[tokio::test]
async fn filters_combine() {
    let app = test_app().await;
    let (token, _) = register(&app, "pete@purdue.edu").await;
    seed(&app, &token).await;

    let (_, body) = send(
        &app,
        "GET",
        "/api/purdue-courses?department=CS&workload=high",
        None,
        None,
    )
    .await;
    assert_eq!(codes(&body), ["CS 18000", "CS 25100"]);

    let (_, body) = send(&app, "GET", "/api/purdue-courses?difficulty=3", None, None).await;
    assert_eq!(codes(&body), ["CS 18000", "MA 16100"]);

    let (_, body) = send(
        &app,
        "GET",
        "/api/purdue-courses?department=CS&difficulty=3&workload=low",
        None,
        None,
    )
    .await;
    assert_eq!(body, json!([]));

    let (status, _) = send(&app, "GET", "/api/purdue-courses?difficulty=hard", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn department_and_code_lookups() {
    let app = test_app().await;
    let (token, _) = register(&app, "pete@purdue.edu").await;
    seed(&app, &token).await;

    let (status, body) = send(&app, "GET", "/api/purdue-courses/department/MA", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(codes(&body), ["MA 16100"]);

    let (status, body) = send(&app, "GET", "/api/purdue-courses/CS%2025100", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Data Structures");
    assert_eq!(body["difficulty"], 4);

    let (status, body) = send(&app, "GET", "/api/purdue-courses/CS%2099999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course not found");
}

#[tokio::test]
async fn adding_to_the_catalog_needs_a_session() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/purdue-courses",
        None,
        Some(json!({ "code": "CS 18000", "title": "Problem Solving", "credits": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_entries_are_validated() {
    let app = test_app().await;
    let (token, _) = register(&app, "pete@purdue.edu").await;
    seed(&app, &token).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/purdue-courses",
        Some(&token),
        Some(json!({ "code": "CS 18000", "title": "Again", "credits": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Course code already exists");

    let (status, _) = send(
        &app,
        "POST",
        "/api/purdue-courses",
        Some(&token),
        Some(json!({ "code": "CS 30700", "title": "Software Engineering", "difficulty": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/purdue-courses",
        Some(&token),
        Some(json!({ "title": "No code" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/purdue-courses",
        Some(&token),
        Some(json!({ "code": "CS 49000", "title": "Too Big", "credits": 31 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "credits must be between 0 and 30");
}
