mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{create_semester, register, send, test_app};

#[tokio::test]
async fn enrollment_can_be_read_updated_and_removed_by_id() {
    let app = test_app().await;
    let (token, _) = register(&app, "pete@purdue.edu").await;
    let (intruder, _) = register(&app, "other@purdue.edu").await;
    let semester = create_semester(&app, &token, "Fall", 2025).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({
            "code": "CS 18000",
            "title": "Problem Solving",
            "credits": 4,
            "semesterId": semester,
            "status": "in-progress"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/courses/{}", body["id"].as_str().unwrap());

    let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "CS 18000");
    assert_eq!(body["status"], "in-progress");
    assert_eq!(body["grade"], "Not Graded");

    let (status, body) = send(&app, "GET", &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course not found");

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "grade": "B+" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grade"], "B+");
    assert_eq!(body["status"], "in-progress");

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn enroll_rejects_unbounded_credits() {
    let app = test_app().await;
    let (token, _) = register(&app, "pete@purdue.edu").await;
    let semester = create_semester(&app, &token, "Fall", 2025).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({
            "code": "CS 1",
            "title": "Huge",
            "credits": i64::MAX,
            "semesterId": semester
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "credits must be between 0 and 30");

    let (status, body) = send(&app, "GET", "/api/courses/gpa", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCredits"], 0);
}

#[tokio::test]
async fn unknown_grade_is_a_bad_request() {
    let app = test_app().await;
    let (token, _) = register(&app, "pete@purdue.edu").await;
    let semester = create_semester(&app, &token, "Fall", 2025).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({
            "code": "CS 18000",
            "title": "Problem Solving",
            "credits": 4,
            "semesterId": semester,
            "grade": "E"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
