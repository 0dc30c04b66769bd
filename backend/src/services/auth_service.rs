use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db::{self, internships, semesters, sessions, users};
use crate::error::{AppError, conflict_on_unique};
use crate::models::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UpdateProfileRequest,
    UserProfile,
};
use crate::password;

use super::required_text;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthService {
    db: SqlitePool,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(db: SqlitePool, session_ttl: Duration) -> Self {
        Self { db, session_ttl }
    }

    /// Creates the user and opens a first session in one transaction.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(required_text(req.email.as_deref(), "email")?);
        let password = req
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::BadRequest("password is required".to_string()))?;

        if users::find_credentials(&self.db, &email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = password::hash_password(password);
        let mut tx = self.db.begin().await?;

        let user = users::insert_user(
            &mut *tx,
            users::NewUser {
                email: &email,
                password_hash: &password_hash,
                first_name: trimmed(req.first_name.as_deref()),
                last_name: trimmed(req.last_name.as_deref()),
            },
        )
        .await
        .map_err(|e| conflict_on_unique(e, "User already exists"))?;

        let token = self.open_session(&mut tx, &user.id).await?;
        tx.commit().await?;

        info!("registered user {}", user.id);
        Ok(AuthResponse {
            token,
            user,
            semesters: None,
        })
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(req.email.as_deref().unwrap_or_default());
        let password = req.password.as_deref().unwrap_or_default();

        let Some((user_id, password_hash)) = users::find_credentials(&self.db, &email).await?
        else {
            warn!("login rejected: unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !password::verify_password(password, &password_hash) {
            warn!("login rejected for user {}: bad password", user_id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let purged = sessions::delete_expired(&self.db, &db::now()).await?;
        if purged > 0 {
            debug!("purged {} expired sessions", purged);
        }

        let mut tx = self.db.begin().await?;
        let token = self.open_session(&mut tx, &user_id).await?;
        tx.commit().await?;

        let user = users::find_by_id(&self.db, &user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        let semesters = semesters::list_for_user(&self.db, &user_id).await?;

        info!("user {} logged in", user_id);
        Ok(AuthResponse {
            token,
            user,
            semesters: Some(semesters),
        })
    }

    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let removed = sessions::delete_session(&self.db, &password::hash_token(token)).await?;
        if !removed {
            return Err(AppError::Unauthorized("Session not found".to_string()));
        }
        Ok(())
    }

    /// Resolves a bearer token to the id of the user owning it.
    pub async fn authenticate(&self, token: &str) -> Result<String, AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("Missing session token".to_string()));
        }

        sessions::find_user_id(&self.db, &password::hash_token(token), &db::now())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))
    }

    /// Profile with semesters and internships. Only the caller's own profile is visible.
    pub async fn profile(
        &self,
        user_id: &str,
        caller_id: &str,
    ) -> Result<ProfileResponse, AppError> {
        if user_id != caller_id {
            return Err(AppError::not_found("User"));
        }

        let user = users::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        let semesters = semesters::list_for_user(&self.db, user_id).await?;
        let internships = internships::list_for_user(&self.db, user_id).await?;

        Ok(ProfileResponse {
            user,
            semesters,
            internships,
        })
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, AppError> {
        if let Some(gpa) = req.gpa {
            if !(0.0..=4.0).contains(&gpa) {
                return Err(AppError::BadRequest("gpa must be between 0.0 and 4.0".to_string()));
            }
        }

        if !users::update_profile(&self.db, user_id, &req).await? {
            return Err(AppError::not_found("User"));
        }

        debug!("updated profile of user {}", user_id);
        users::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    async fn open_session(
        &self,
        conn: &mut sqlx::SqliteConnection,
        user_id: &str,
    ) -> Result<String, AppError> {
        let token = password::new_session_token();
        let now = Utc::now();

        sessions::insert_session(
            conn,
            &password::hash_token(&token),
            user_id,
            &db::timestamp(now),
            &db::timestamp(now + self.session_ttl),
        )
        .await?;

        Ok(token)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
