use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog course. Shared by every user and referenced by enrollments.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub title: String,
    pub credits: i64,
    pub description: Option<String>,
    pub prerequisites: Option<String>,
    pub department: Option<String>,
    pub difficulty: Option<i64>,
    pub workload: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub credits: Option<i64>,
    pub description: Option<String>,
    pub prerequisites: Option<String>,
    pub department: Option<String>,
    pub difficulty: Option<i64>,
    pub workload: Option<String>,
}

/// Catalog browse filters. Every provided field must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub department: Option<String>,
    pub difficulty: Option<i64>,
    pub workload: Option<String>,
}
