use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::{NewSemesterRequest, Semester, SemesterQuery, UpdateSemesterRequest};
use crate::services::SemesterService;
use crate::state::AppState;

use super::{ApiJson, ApiQuery, CurrentUser, ensure_self};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_semesters).post(create_semester))
        .route(
            "/{id}",
            get(get_semester).put(update_semester).delete(delete_semester),
        )
}

async fn list_semesters(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(params): ApiQuery<SemesterQuery>,
) -> Result<Json<Vec<Semester>>, AppError> {
    ensure_self(params.user_id.as_deref(), &user)?;
    let semesters = SemesterService::new(state.db).list(&user.user_id).await?;
    Ok(Json(semesters))
}

async fn get_semester(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Semester>, AppError> {
    let semester = SemesterService::new(state.db).get(&id, &user.user_id).await?;
    Ok(Json(semester))
}

async fn create_semester(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<NewSemesterRequest>,
) -> Result<(StatusCode, Json<Semester>), AppError> {
    let semester = SemesterService::new(state.db).create(&user.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(semester)))
}

async fn update_semester(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateSemesterRequest>,
) -> Result<Json<Semester>, AppError> {
    let semester = SemesterService::new(state.db)
        .update(&id, &user.user_id, req)
        .await?;
    Ok(Json(semester))
}

async fn delete_semester(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    SemesterService::new(state.db).delete(&id, &user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
