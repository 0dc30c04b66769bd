use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::{NewSlotRequest, TimetableQuery, TimetableSlot};
use crate::services::TimetableService;
use crate::state::AppState;

use super::{ApiJson, ApiQuery, CurrentUser};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_slots).post(add_slot))
        .route("/{id}", delete(remove_slot))
}

async fn list_slots(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(params): ApiQuery<TimetableQuery>,
) -> Result<Json<Vec<TimetableSlot>>, AppError> {
    let slots = TimetableService::new(state.db)
        .list(params.semester_id.as_deref(), &user.user_id)
        .await?;
    Ok(Json(slots))
}

async fn add_slot(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<NewSlotRequest>,
) -> Result<(StatusCode, Json<TimetableSlot>), AppError> {
    let slot = TimetableService::new(state.db)
        .add_slot(&user.user_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

async fn remove_slot(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    TimetableService::new(state.db)
        .remove_slot(&id, &user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
