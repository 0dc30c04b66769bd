use sqlx::SqliteExecutor;

use crate::models::{CatalogFilter, Course};

use super::{new_id, now};

pub struct CourseDraft<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub credits: i64,
    pub description: Option<&'a str>,
    pub prerequisites: Option<&'a str>,
    pub department: Option<&'a str>,
    pub difficulty: Option<i64>,
    pub workload: Option<&'a str>,
}

impl<'a> CourseDraft<'a> {
    pub fn new(code: &'a str, title: &'a str, credits: i64) -> Self {
        Self {
            code,
            title,
            credits,
            description: None,
            prerequisites: None,
            department: None,
            difficulty: None,
            workload: None,
        }
    }
}

pub async fn list_courses<'e, E>(db: E, filter: &CatalogFilter) -> Result<Vec<Course>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, code, title, credits, description, prerequisites,
               department, difficulty, workload, created_at
        FROM courses
        WHERE (?1 IS NULL OR department = ?1)
          AND (?2 IS NULL OR difficulty = ?2)
          AND (?3 IS NULL OR workload = ?3)
        ORDER BY code
        "#,
    )
    .bind(filter.department.as_deref())
    .bind(filter.difficulty)
    .bind(filter.workload.as_deref())
    .fetch_all(db)
    .await
}

pub async fn find_by_code<'e, E>(db: E, code: &str) -> Result<Option<Course>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, code, title, credits, description, prerequisites,
               department, difficulty, workload, created_at
        FROM courses
        WHERE code = ?
        "#,
    )
    .bind(code)
    .fetch_optional(db)
    .await
}

pub async fn insert_course<'e, E>(db: E, draft: CourseDraft<'_>) -> Result<Course, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = new_id();
    let created_at = now();

    sqlx::query(
        r#"
        INSERT INTO courses
            (id, code, title, credits, description, prerequisites,
            department, difficulty, workload, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )
    .bind(&id)
    .bind(draft.code)
    .bind(draft.title)
    .bind(draft.credits)
    .bind(draft.description)
    .bind(draft.prerequisites)
    .bind(draft.department)
    .bind(draft.difficulty)
    .bind(draft.workload)
    .bind(&created_at)
    .execute(db)
    .await?;

    Ok(Course {
        id,
        code: draft.code.to_string(),
        title: draft.title.to_string(),
        credits: draft.credits,
        description: draft.description.map(str::to_string),
        prerequisites: draft.prerequisites.map(str::to_string),
        department: draft.department.map(str::to_string),
        difficulty: draft.difficulty,
        workload: draft.workload.map(str::to_string),
        created_at,
    })
}

/// Inserts the course unless its code is already in the catalog. An existing
/// row is left untouched. Returns whether a row was written.
pub async fn insert_if_missing<'e, E>(db: E, draft: CourseDraft<'_>) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO courses (id, code, title, credits, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT (code) DO NOTHING
        "#,
    )
    .bind(new_id())
    .bind(draft.code)
    .bind(draft.title)
    .bind(draft.credits)
    .bind(now())
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}
