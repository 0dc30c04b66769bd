use sqlx::SqlitePool;
use tracing::info;

use crate::db::internships::{self, InternshipDraft};
use crate::error::AppError;
use crate::models::{Internship, NewInternshipRequest, UpdateInternshipRequest};

use super::{replacement_text, required_text};

pub struct InternshipService {
    db: SqlitePool,
}

impl InternshipService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Internship>, AppError> {
        Ok(internships::list_for_user(&self.db, user_id).await?)
    }

    pub async fn get(&self, id: &str, user_id: &str) -> Result<Internship, AppError> {
        internships::find_owned(&self.db, id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Internship"))
    }

    pub async fn create(
        &self,
        user_id: &str,
        req: NewInternshipRequest,
    ) -> Result<Internship, AppError> {
        let company = required_text(req.company.as_deref(), "company")?;
        let role = required_text(req.role.as_deref(), "role")?;

        let internship = internships::insert_internship(
            &self.db,
            user_id,
            InternshipDraft {
                company,
                role,
                start_date: req.start_date,
                end_date: req.end_date,
                description: req.description.as_deref(),
            },
        )
        .await?;

        info!("logged internship {} for user {}", internship.id, user_id);
        Ok(internship)
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        mut req: UpdateInternshipRequest,
    ) -> Result<Internship, AppError> {
        req.company = replacement_text(req.company.as_deref(), "company")?;
        req.role = replacement_text(req.role.as_deref(), "role")?;

        if !internships::update_internship(&self.db, id, user_id, &req).await? {
            return Err(AppError::not_found("Internship"));
        }
        self.get(id, user_id).await
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        if !internships::delete_internship(&self.db, id, user_id).await? {
            return Err(AppError::not_found("Internship"));
        }
        Ok(())
    }
}
