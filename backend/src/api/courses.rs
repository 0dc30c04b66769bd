use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::{EnrollRequest, Enrollment, GpaQuery, GpaSummary, UpdateEnrollmentRequest};
use crate::services::EnrollmentService;
use crate::state::AppState;

use super::{ApiJson, ApiQuery, CurrentUser};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(enroll))
        .route("/semester/{semester_id}", get(list_semester_courses))
        .route("/gpa", get(gpa_summary))
        .route(
            "/{id}",
            get(get_enrollment).put(update_enrollment).delete(unenroll),
        )
}

async fn list_courses(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let rows = EnrollmentService::new(state.db)
        .list_for_user(&user.user_id)
        .await?;
    Ok(Json(rows))
}

async fn list_semester_courses(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(semester_id): Path<String>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let rows = EnrollmentService::new(state.db)
        .list_for_semester(&semester_id, &user.user_id)
        .await?;
    Ok(Json(rows))
}

async fn get_enrollment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::new(state.db).get(&id, &user.user_id).await?;
    Ok(Json(enrollment))
}

async fn gpa_summary(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(params): ApiQuery<GpaQuery>,
) -> Result<Json<GpaSummary>, AppError> {
    let summary = EnrollmentService::new(state.db)
        .gpa_summary(&user.user_id, params.semester_id.as_deref())
        .await?;
    Ok(Json(summary))
}

async fn enroll(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<EnrollRequest>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = EnrollmentService::new(state.db)
        .enroll(&user.user_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

async fn update_enrollment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateEnrollmentRequest>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::new(state.db)
        .update(&id, &user.user_id, req)
        .await?;
    Ok(Json(enrollment))
}

async fn unenroll(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    EnrollmentService::new(state.db)
        .unenroll(&id, &user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
