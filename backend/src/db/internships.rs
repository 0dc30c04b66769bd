use chrono::NaiveDate;
use sqlx::SqliteExecutor;

use crate::models::{Internship, UpdateInternshipRequest};

use super::{new_id, now};

pub struct InternshipDraft<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<&'a str>,
}

pub async fn list_for_user<'e, E>(db: E, user_id: &str) -> Result<Vec<Internship>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Internship>(
        r#"
        SELECT id, user_id, company, role, start_date, end_date, description, created_at
        FROM internships
        WHERE user_id = ?
        ORDER BY start_date IS NULL, start_date DESC, created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_owned<'e, E>(
    db: E,
    id: &str,
    user_id: &str,
) -> Result<Option<Internship>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Internship>(
        r#"
        SELECT id, user_id, company, role, start_date, end_date, description, created_at
        FROM internships
        WHERE id = ?1 AND user_id = ?2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn insert_internship<'e, E>(
    db: E,
    user_id: &str,
    draft: InternshipDraft<'_>,
) -> Result<Internship, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = new_id();
    let created_at = now();

    sqlx::query(
        r#"
        INSERT INTO internships
            (id, user_id, company, role, start_date, end_date, description, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(draft.company)
    .bind(draft.role)
    .bind(draft.start_date)
    .bind(draft.end_date)
    .bind(draft.description)
    .bind(&created_at)
    .execute(db)
    .await?;

    Ok(Internship {
        id,
        user_id: user_id.to_string(),
        company: draft.company.to_string(),
        role: draft.role.to_string(),
        start_date: draft.start_date,
        end_date: draft.end_date,
        description: draft.description.map(str::to_string),
        created_at,
    })
}

pub async fn update_internship<'e, E>(
    db: E,
    id: &str,
    user_id: &str,
    req: &UpdateInternshipRequest,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE internships
        SET company = COALESCE(?3, company),
            role = COALESCE(?4, role),
            start_date = COALESCE(?5, start_date),
            end_date = COALESCE(?6, end_date),
            description = COALESCE(?7, description)
        WHERE id = ?1 AND user_id = ?2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(req.company.as_deref())
    .bind(req.role.as_deref())
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(req.description.as_deref())
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_internship<'e, E>(db: E, id: &str, user_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM internships WHERE id = ?1 AND user_id = ?2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
