use sqlx::SqliteExecutor;

use crate::models::{Enrollment, EnrollmentStatus, Grade};

use super::{new_id, now};

const ENROLLMENT_SELECT: &str = r#"
    SELECT e.id, e.user_id, e.course_id, e.semester_id, e.status, e.grade,
           c.code, c.title, c.credits, e.created_at
    FROM user_schedule e
    JOIN courses c ON c.id = e.course_id
"#;

pub async fn list_for_user<'e, E>(db: E, user_id: &str) -> Result<Vec<Enrollment>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{ENROLLMENT_SELECT} WHERE e.user_id = ?1 ORDER BY e.created_at, c.code");
    sqlx::query_as::<_, Enrollment>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await
}

pub async fn list_for_semester<'e, E>(
    db: E,
    semester_id: &str,
    user_id: &str,
) -> Result<Vec<Enrollment>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "{ENROLLMENT_SELECT} WHERE e.semester_id = ?1 AND e.user_id = ?2 \
         ORDER BY e.created_at, c.code"
    );
    sqlx::query_as::<_, Enrollment>(&sql)
        .bind(semester_id)
        .bind(user_id)
        .fetch_all(db)
        .await
}

pub async fn find_owned<'e, E>(
    db: E,
    id: &str,
    user_id: &str,
) -> Result<Option<Enrollment>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{ENROLLMENT_SELECT} WHERE e.id = ?1 AND e.user_id = ?2");
    sqlx::query_as::<_, Enrollment>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
}

/// Returns the new enrollment id.
pub async fn insert_enrollment<'e, E>(
    db: E,
    user_id: &str,
    course_id: &str,
    semester_id: &str,
    status: EnrollmentStatus,
    grade: Grade,
) -> Result<String, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = new_id();

    sqlx::query(
        r#"
        INSERT INTO user_schedule (id, user_id, course_id, semester_id, status, grade, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(course_id)
    .bind(semester_id)
    .bind(status.as_str())
    .bind(grade.as_str())
    .bind(now())
    .execute(db)
    .await?;

    Ok(id)
}

pub async fn update_enrollment<'e, E>(
    db: E,
    id: &str,
    user_id: &str,
    grade: Option<Grade>,
    status: Option<EnrollmentStatus>,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE user_schedule
        SET grade = COALESCE(?3, grade),
            status = COALESCE(?4, status)
        WHERE id = ?1 AND user_id = ?2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(grade.map(Grade::as_str))
    .bind(status.map(EnrollmentStatus::as_str))
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_enrollment<'e, E>(db: E, id: &str, user_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM user_schedule WHERE id = ?1 AND user_id = ?2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
