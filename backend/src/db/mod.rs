//! SQLite persistence: pool setup, migrations and one repository module per table.
//!
//! Repository functions take any `SqliteExecutor`, so the same call works on the
//! pool or inside a transaction, and return raw `sqlx::Error`s. Mapping to API
//! errors happens in `services`.

pub mod catalog;
pub mod enrollments;
pub mod internships;
pub mod semesters;
pub mod sessions;
pub mod timetable;
pub mod users;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

use crate::config::Config;

/// Builds the pool without touching the database. Connections are opened on
/// first use, so an unreachable store does not stop the server from starting.
pub fn connect_lazy(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    Ok(SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect_lazy_with(options))
}

pub async fn migrate(db: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(db).await
}

/// A migrated private in-memory database. Single connection, never recycled,
/// since every new in-memory connection would see an empty database.
pub async fn in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

    Ok(pool)
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fixed-width UTC timestamps, so that string comparison in SQL is chronological.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn now() -> String {
    timestamp(Utc::now())
}
