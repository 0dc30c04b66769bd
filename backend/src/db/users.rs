use sqlx::SqliteExecutor;

use crate::models::{UpdateProfileRequest, UserProfile};

use super::{new_id, now};

pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

pub async fn insert_user<'e, E>(db: E, user: NewUser<'_>) -> Result<UserProfile, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = new_id();
    let created_at = now();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, first_name, last_name, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&id)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(&created_at)
    .execute(db)
    .await?;

    Ok(UserProfile {
        id,
        email: user.email.to_string(),
        first_name: user.first_name.map(str::to_string),
        last_name: user.last_name.map(str::to_string),
        major: None,
        graduation_year: None,
        gpa: None,
        created_at,
    })
}

pub async fn find_by_id<'e, E>(db: E, id: &str) -> Result<Option<UserProfile>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, email, first_name, last_name, major, graduation_year, gpa, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Returns `(user id, password hash)` for the given email.
pub async fn find_credentials<'e, E>(
    db: E,
    email: &str,
) -> Result<Option<(String, String)>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, (String, String)>("SELECT id, password_hash FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await
}

pub async fn update_profile<'e, E>(
    db: E,
    id: &str,
    req: &UpdateProfileRequest,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET first_name = COALESCE(?2, first_name),
            last_name = COALESCE(?3, last_name),
            major = COALESCE(?4, major),
            graduation_year = COALESCE(?5, graduation_year),
            gpa = COALESCE(?6, gpa)
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(req.first_name.as_deref())
    .bind(req.last_name.as_deref())
    .bind(req.major.as_deref())
    .bind(req.graduation_year)
    .bind(req.gpa)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}
