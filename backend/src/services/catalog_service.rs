use sqlx::SqlitePool;
use tracing::info;

use crate::db::catalog::{self, CourseDraft};
use crate::error::{AppError, conflict_on_unique};
use crate::models::{CatalogFilter, Course, NewCourseRequest};

use super::{credit_hours, required_text};

/// Read access to the shared course catalog, plus adding entries to it.
pub struct CatalogService {
    db: SqlitePool,
}

impl CatalogService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: CatalogFilter) -> Result<Vec<Course>, AppError> {
        let filter = CatalogFilter {
            department: non_blank(filter.department),
            difficulty: filter.difficulty,
            workload: non_blank(filter.workload),
        };
        Ok(catalog::list_courses(&self.db, &filter).await?)
    }

    pub async fn list_by_department(&self, department: &str) -> Result<Vec<Course>, AppError> {
        self.list(CatalogFilter {
            department: Some(department.to_string()),
            ..CatalogFilter::default()
        })
        .await
    }

    pub async fn get(&self, code: &str) -> Result<Course, AppError> {
        catalog::find_by_code(&self.db, code.trim())
            .await?
            .ok_or_else(|| AppError::not_found("Course"))
    }

    pub async fn create(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        let code = required_text(req.code.as_deref(), "code")?;
        let title = required_text(req.title.as_deref(), "title")?;
        let credits = credit_hours(req.credits.unwrap_or(0))?;
        if let Some(difficulty) = req.difficulty {
            if !(1..=5).contains(&difficulty) {
                return Err(AppError::BadRequest("difficulty must be between 1 and 5".to_string()));
            }
        }

        let draft = CourseDraft {
            description: req.description.as_deref(),
            prerequisites: req.prerequisites.as_deref(),
            department: req.department.as_deref().map(str::trim),
            difficulty: req.difficulty,
            workload: req.workload.as_deref().map(str::trim),
            ..CourseDraft::new(code, title, credits)
        };

        let course = catalog::insert_course(&self.db, draft)
            .await
            .map_err(|e| conflict_on_unique(e, "Course code already exists"))?;

        info!("added {} to the catalog", course.code);
        Ok(course)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
