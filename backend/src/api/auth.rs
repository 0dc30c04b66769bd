use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UpdateProfileRequest,
    UserProfile,
};
use crate::services::AuthService;
use crate::state::AppState;

use super::{ApiJson, CurrentUser};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", put(update_profile))
        .route("/{id}", get(get_profile))
}

fn service(state: &AppState) -> AuthService {
    AuthService::new(state.db.clone(), state.session_ttl)
}

async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let auth = service(&state).register(req).await?;
    Ok((StatusCode::CREATED, Json(auth)))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let auth = service(&state).login(req).await?;
    Ok(Json(auth))
}

async fn logout(State(state): State<AppState>, user: CurrentUser) -> Result<StatusCode, AppError> {
    service(&state).logout(&user.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = service(&state).profile(&id, &user.user_id).await?;
    Ok(Json(profile))
}

async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = service(&state).update_profile(&user.user_id, req).await?;
    Ok(Json(profile))
}
