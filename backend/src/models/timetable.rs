use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recurring weekly block. `day_of_week` runs from 1 (Monday) to 7 (Sunday).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    pub id: String,
    pub semester_id: String,
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
    pub course_label: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlotRequest {
    pub semester_id: Option<String>,
    pub day_of_week: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub course_label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableQuery {
    pub semester_id: Option<String>,
}
