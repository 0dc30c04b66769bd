use chrono::NaiveDate;
use sqlx::SqliteExecutor;

use crate::models::{Semester, UpdateSemesterRequest};

use super::{new_id, now};

pub async fn list_for_user<'e, E>(db: E, user_id: &str) -> Result<Vec<Semester>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Semester>(
        r#"
        SELECT id, user_id, term, year, start_date, end_date, created_at
        FROM semesters
        WHERE user_id = ?
        ORDER BY year DESC, term ASC
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
) -> Result<Option<Semester>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Semester>(
        r#"
        SELECT id, user_id, term, year, start_date, end_date, created_at
        FROM semesters
        WHERE id = ?1 AND user_id = ?2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn insert_semester<'e, E>(
    db: E,
    user_id: &str,
    term: &str,
    year: i64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Semester, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = new_id();
    let created_at = now();

    sqlx::query(
        r#"
        INSERT INTO semesters (id, user_id, term, year, start_date, end_date, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(term)
    .bind(year)
    .bind(start_date)
    .bind(end_date)
    .bind(&created_at)
    .execute(db)
    .await?;

    Ok(Semester {
        id,
        user_id: user_id.to_string(),
        term: term.to_string(),
        year,
        start_date,
        end_date,
        created_at,
    })
}

pub async fn update_semester<'e, E>(
    db: E,
    id: &str,
    user_id: &str,
    req: &UpdateSemesterRequest,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE semesters
        SET term = COALESCE(?3, term),
            year = COALESCE(?4, year),
            start_date = COALESCE(?5, start_date),
            end_date = COALESCE(?6, end_date)
        WHERE id = ?1 AND user_id = ?2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(req.term.as_deref())
    .bind(req.year)
    .bind(req.start_date)
    .bind(req.end_date)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

/// Enrollments and timetable slots go with it through `ON DELETE CASCADE`.
pub async fn delete_semester<'e, E>(db: E, id: &str, user_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM semesters WHERE id = ?1 AND user_id = ?2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
