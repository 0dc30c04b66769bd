mod auth;
mod catalog;
mod courses;
mod extract;
mod internships;
mod semesters;
mod timetable;

use axum::http::{Method, StatusCode, Uri};
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

pub use extract::{ApiJson, ApiQuery, CurrentUser};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", auth::routes())
        .nest("/semesters", semesters::routes())
        .nest("/courses", courses::routes())
        .nest("/purdue-courses", catalog::routes())
        .nest("/internships", internships::routes())
        .nest("/timetable", timetable::routes());

    Router::new()
        .nest("/api", api)
        .fallback(endpoint_not_found)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(Json(HealthResponse {
        status: "Server is running",
        database: "SQLite",
    }))
}

async fn endpoint_not_found(method: Method, uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::NOT_FOUND;
    (
        status,
        Json(ErrorResponse {
            error: status.to_string(),
            message: format!("Endpoint not found: {} {}", method, uri.path()),
        }),
    )
}

/// A `userId` supplied by the caller must be the session user.
fn ensure_self(requested: Option<&str>, user: &CurrentUser) -> Result<(), AppError> {
    match requested {
        Some(id) if id != user.user_id => Err(AppError::not_found("User")),
        _ => Ok(()),
    }
}
