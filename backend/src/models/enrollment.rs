use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::grade::{EnrollmentStatus, Grade};

/// A `user_schedule` row joined with the catalog course it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub semester_id: String,
    #[sqlx(try_from = "String")]
    pub status: EnrollmentStatus,
    #[sqlx(try_from = "String")]
    pub grade: Grade,
    pub code: String,
    pub title: String,
    pub credits: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub credits: Option<i64>,
    pub semester_id: Option<String>,
    pub grade: Option<Grade>,
    pub status: Option<EnrollmentStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentRequest {
    pub grade: Option<Grade>,
    pub status: Option<EnrollmentStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaQuery {
    pub semester_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_credits: i64,
    pub course_count: usize,
}
