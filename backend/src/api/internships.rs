use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::{Internship, NewInternshipRequest, UpdateInternshipRequest};
use crate::services::InternshipService;
use crate::state::AppState;

use super::{ApiJson, CurrentUser, ensure_self};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_internships).post(create_internship))
        .route("/user/{user_id}", get(list_user_internships))
        .route(
            "/{id}",
            get(get_internship)
                .put(update_internship)
                .delete(delete_internship),
        )
}

async fn list_internships(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Internship>>, AppError> {
    let internships = InternshipService::new(state.db).list(&user.user_id).await?;
    Ok(Json(internships))
}

async fn list_user_internships(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Internship>>, AppError> {
    ensure_self(Some(&user_id), &user)?;
    let internships = InternshipService::new(state.db).list(&user.user_id).await?;
    Ok(Json(internships))
}

async fn get_internship(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Internship>, AppError> {
    let internship = InternshipService::new(state.db).get(&id, &user.user_id).await?;
    Ok(Json(internship))
}

async fn create_internship(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<NewInternshipRequest>,
) -> Result<(StatusCode, Json<Internship>), AppError> {
    let internship = InternshipService::new(state.db)
        .create(&user.user_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(internship)))
}

async fn update_internship(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateInternshipRequest>,
) -> Result<Json<Internship>, AppError> {
    let internship = InternshipService::new(state.db)
        .update(&id, &user.user_id, req)
        .await?;
    Ok(Json(internship))
}

async fn delete_internship(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    InternshipService::new(state.db)
        .delete(&id, &user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
