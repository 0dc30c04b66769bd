use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::{CatalogFilter, Course, NewCourseRequest};
use crate::services::CatalogService;
use crate::state::AppState;

use super::{ApiJson, ApiQuery, CurrentUser};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalog).post(create_catalog_course))
        .route("/department/{dept}", get(list_department))
        .route("/{code}", get(get_catalog_course))
}

async fn list_catalog(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CatalogFilter>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CatalogService::new(state.db).list(filter).await?;
    Ok(Json(courses))
}

async fn list_department(
    State(state): State<AppState>,
    Path(dept): Path<String>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CatalogService::new(state.db).list_by_department(&dept).await?;
    Ok(Json(courses))
}

async fn get_catalog_course(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = CatalogService::new(state.db).get(&code).await?;
    Ok(Json(course))
}

async fn create_catalog_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiJson(req): ApiJson<NewCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CatalogService::new(state.db).create(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}
