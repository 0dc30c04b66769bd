use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::catalog::{self, CourseDraft};
use crate::db::{enrollments, semesters};
use crate::error::{AppError, conflict_on_unique};
use crate::gpa::compute_gpa;
use crate::models::{EnrollRequest, Enrollment, GpaSummary, UpdateEnrollmentRequest};

use super::{credit_hours, required, required_text};

const DUPLICATE_ENROLLMENT: &str = "Course already added to this semester";

pub struct EnrollmentService {
    db: SqlitePool,
}

impl EnrollmentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Enrollment>, AppError> {
        Ok(enrollments::list_for_user(&self.db, user_id).await?)
    }

    /// Empty for a semester that is gone or belongs to someone else.
    pub async fn list_for_semester(
        &self,
        semester_id: &str,
        user_id: &str,
    ) -> Result<Vec<Enrollment>, AppError> {
        Ok(enrollments::list_for_semester(&self.db, semester_id, user_id).await?)
    }

    pub async fn get(&self, id: &str, user_id: &str) -> Result<Enrollment, AppError> {
        enrollments::find_owned(&self.db, id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course"))
    }

    /// Adds a course to one of the user's semesters.
    ///
    /// The catalog entry is looked up by code and created when missing; the
    /// enrollment row is then inserted. Both happen in one transaction, so a
    /// failed enrollment never leaves a half-created course behind. The
    /// transaction takes the write lock up front, so concurrent enrolls queue
    /// instead of failing to upgrade a read lock.
    pub async fn enroll(&self, user_id: &str, req: EnrollRequest) -> Result<Enrollment, AppError> {
        let code = required_text(req.code.as_deref(), "code")?;
        let title = required_text(req.title.as_deref(), "title")?;
        let credits = credit_hours(required(req.credits, "credits")?)?;
        let semester_id = required_text(req.semester_id.as_deref(), "semesterId")?;

        let mut tx = self.db.begin_with("BEGIN IMMEDIATE").await?;

        if semesters::find_owned(&mut *tx, semester_id, user_id).await?.is_none() {
            return Err(AppError::not_found("Semester"));
        }

        if catalog::insert_if_missing(&mut *tx, CourseDraft::new(code, title, credits)).await? {
            debug!("created catalog course {}", code);
        }
        let course = catalog::find_by_code(&mut *tx, code)
            .await?
            .ok_or(AppError::InternalServerError)?;

        let id = enrollments::insert_enrollment(
            &mut *tx,
            user_id,
            &course.id,
            semester_id,
            req.status.unwrap_or_default(),
            req.grade.unwrap_or_default(),
        )
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_ENROLLMENT))?;

        let enrollment = enrollments::find_owned(&mut *tx, &id, user_id)
            .await?
            .ok_or(AppError::InternalServerError)?;

        tx.commit().await?;

        info!("user {} enrolled in {} for semester {}", user_id, code, semester_id);
        Ok(enrollment)
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        req: UpdateEnrollmentRequest,
    ) -> Result<Enrollment, AppError> {
        if !enrollments::update_enrollment(&self.db, id, user_id, req.grade, req.status).await? {
            return Err(AppError::not_found("Course"));
        }

        self.get(id, user_id).await
    }

    /// Removes the enrollment. The catalog course stays.
    pub async fn unenroll(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        if !enrollments::delete_enrollment(&self.db, id, user_id).await? {
            return Err(AppError::not_found("Course"));
        }
        info!("removed enrollment {}", id);
        Ok(())
    }

    pub async fn gpa_summary(
        &self,
        user_id: &str,
        semester_id: Option<&str>,
    ) -> Result<GpaSummary, AppError> {
        let rows = match semester_id {
            Some(semester_id) => self.list_for_semester(semester_id, user_id).await?,
            None => self.list_for_user(user_id).await?,
        };

        Ok(summarize(&rows))
    }
}

pub fn summarize(rows: &[Enrollment]) -> GpaSummary {
    GpaSummary {
        gpa: compute_gpa(rows.iter().map(|e| (e.grade, e.credits))),
        total_credits: rows.iter().map(|e| e.credits).sum(),
        course_count: rows.len(),
    }
}
