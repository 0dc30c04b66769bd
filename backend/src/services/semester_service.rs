use sqlx::SqlitePool;
use tracing::info;

use crate::db::semesters;
use crate::error::{AppError, conflict_on_unique};
use crate::models::{NewSemesterRequest, Semester, UpdateSemesterRequest};

use super::{required, required_text};

const DUPLICATE_SEMESTER: &str = "Semester already exists for this term and year";

pub struct SemesterService {
    db: SqlitePool,
}

impl SemesterService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Semester>, AppError> {
        Ok(semesters::list_for_user(&self.db, user_id).await?)
    }

    pub async fn get(&self, id: &str, user_id: &str) -> Result<Semester, AppError> {
        semesters::find_owned(&self.db, id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Semester"))
    }

    pub async fn create(
        &self,
        user_id: &str,
        req: NewSemesterRequest,
    ) -> Result<Semester, AppError> {
        let term = required_text(req.term.as_deref(), "term")?;
        let year = required(req.year, "year")?;

        let semester = semesters::insert_semester(
            &self.db,
            user_id,
            term,
            year,
            req.start_date,
            req.end_date,
        )
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_SEMESTER))?;

        info!("created semester {} {} for user {}", semester.term, semester.year, user_id);
        Ok(semester)
    }

    /// Coalescing update: fields left out of `req` keep their stored value.
    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        mut req: UpdateSemesterRequest,
    ) -> Result<Semester, AppError> {
        req.term = req
            .term
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let updated = semesters::update_semester(&self.db, id, user_id, &req)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_SEMESTER))?;
        if !updated {
            return Err(AppError::not_found("Semester"));
        }

        self.get(id, user_id).await
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        if !semesters::delete_semester(&self.db, id, user_id).await? {
            return Err(AppError::not_found("Semester"));
        }
        info!("deleted semester {}", id);
        Ok(())
    }
}
