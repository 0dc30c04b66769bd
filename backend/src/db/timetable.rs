use sqlx::SqliteExecutor;

use crate::models::TimetableSlot;

use super::{new_id, now};

/// Slots of a semester owned by `user_id`; empty for anyone else's semester.
pub async fn list_for_semester<'e, E>(
    db: E,
    semester_id: &str,
    user_id: &str,
) -> Result<Vec<TimetableSlot>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, TimetableSlot>(
        r#"
        SELECT t.id, t.semester_id, t.day_of_week, t.start_time, t.end_time,
               t.course_label, t.created_at
        FROM semester_timetable t
        JOIN semesters s ON s.id = t.semester_id
        WHERE t.semester_id = ?1 AND s.user_id = ?2
        ORDER BY t.day_of_week, t.start_time
        "#,
    )
    .bind(semester_id)
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn insert_slot<'e, E>(
    db: E,
    semester_id: &str,
    day_of_week: i64,
    start_time: &str,
    end_time: &str,
    course_label: &str,
) -> Result<TimetableSlot, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = new_id();
    let created_at = now();

    sqlx::query(
        r#"
        INSERT INTO semester_timetable
            (id, semester_id, day_of_week, start_time, end_time, course_label, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&id)
    .bind(semester_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(course_label)
    .bind(&created_at)
    .execute(db)
    .await?;

    Ok(TimetableSlot {
        id,
        semester_id: semester_id.to_string(),
        day_of_week,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        course_label: course_label.to_string(),
        created_at,
    })
}

/// Deletes a slot only if its semester belongs to `user_id`.
pub async fn delete_slot<'e, E>(db: E, id: &str, user_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM semester_timetable
        WHERE id = ?1
          AND semester_id IN (SELECT id FROM semesters WHERE user_id = ?2)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}
